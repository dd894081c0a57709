//! # Statistics Tests

use vcsim_core::stats::{STATS_SECTIONS, SimStats};

use crate::common::harness::TestContext;

fn render(stats: &SimStats, sections: &[&str]) -> String {
    let sections: Vec<String> = sections.iter().map(ToString::to_string).collect();
    let mut buf = Vec::new();
    stats.write_sections(&mut buf, &sections).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_all_sections_by_default() {
    let text = render(&SimStats::default(), &[]);
    assert!(text.contains("VECTOR CORE SIMULATION STATISTICS"));
    assert!(text.contains("ISSUE QUEUES"));
    assert!(text.contains("RESOURCE UTILIZATION"));
    assert!(text.contains("VECTOR MEMORY"));
    assert_eq!(STATS_SECTIONS.len(), 4);
}

#[test]
fn test_run_populates_counters() {
    let mut ctx = TestContext::new("LV VR1 (0)\nADDVV VR2 VR1 VR3\nADD SR1 SR2 SR3\n");
    let _ = ctx.run_drained();
    let stats = &ctx.core.stats;
    assert_eq!(stats.cycles, ctx.core.cycle);
    assert_eq!(stats.instructions_fetched, 3);
    assert_eq!(stats.instructions_issued, 3);
    assert_eq!(stats.instructions_dispatched, 3);
    assert_eq!(stats.instructions_retired, 3);
    assert_eq!(stats.dispatched_by_class, [1, 1, 1]);
    assert!(stats.stall_cycles() > 0);

    let text = render(stats, &["queues", "resources"]);
    assert!(text.contains("dispatch.compute"));
    assert!(text.contains("busy.memory"));
    assert!(!text.contains("sim_ipc"));
}
