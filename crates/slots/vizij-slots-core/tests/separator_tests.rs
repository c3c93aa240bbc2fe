use vizij_slots_core::separators::{
    boundary_positions, position_separators, settle_separators, steady_separators,
    SeparatorPhase::{self, *},
};

/// it should place boundaries directly at steady on first paint
#[test]
fn first_paint_is_steady() {
    for k in 1..10 {
        assert_eq!(position_separators(k, &[], true, 0), steady_separators(k, 0));
    }
    assert_eq!(
        position_separators(7, &[], true, 0),
        vec![Steady, Absent, Absent, Steady, Absent, Absent, Absent]
    );
}

/// it should enter a comma when 994 becomes 1005
#[test]
fn growth_enters_new_boundary() {
    let previous = steady_separators(3, 0);
    let phases = position_separators(4, &previous, false, 0);
    assert_eq!(phases, vec![Entering, Absent, Absent, Absent]);
    assert_eq!(settle_separators(&phases, 0, 4), vec![Steady, Absent, Absent, Absent]);
}

/// it should exit the comma when 1005 becomes 994
#[test]
fn shrink_exits_old_boundary() {
    let previous = steady_separators(4, 0);
    let phases = position_separators(3, &previous, false, 0);
    assert_eq!(phases, vec![Exiting, Absent, Absent, Absent]);
    // the leading slot exits, so its marker is pruned with it
    assert_eq!(settle_separators(&phases, 1, 3), vec![Absent; 3]);
}

/// it should move the comma when growing in place
#[test]
fn left_aligned_growth_moves_boundary() {
    let previous = steady_separators(4, 0);
    let phases = position_separators(5, &previous, true, 0);
    assert_eq!(phases, vec![Exiting, Entering, Absent, Absent, Absent]);
    assert_eq!(settle_separators(&phases, 0, 5), steady_separators(5, 0));
}

/// it should keep a boundary that survives a right-aligned shrink
#[test]
fn right_aligned_shrink_keeps_surviving_boundary() {
    let previous = steady_separators(5, 0);
    let phases = position_separators(4, &previous, false, 0);
    assert_eq!(phases, vec![Absent, Steady, Absent, Absent, Absent]);
    assert_eq!(settle_separators(&phases, 1, 4), steady_separators(4, 0));
}

/// it should never mark fractional positions
#[test]
fn precision_positions_are_absent() {
    let phases = position_separators(6, &[], true, 2);
    assert_eq!(phases, vec![Steady, Absent, Absent, Absent, Absent, Absent]);

    let grown = position_separators(7, &phases, false, 2);
    assert_eq!(grown.len(), 7);
    assert!(grown[5..].iter().all(|p| *p == Absent));
}

/// it should settle to the boundary law for any sequence of lengths
#[test]
fn settled_rows_follow_boundary_law() {
    let mut phases: Vec<SeparatorPhase> = Vec::new();
    let mut len = 0usize;
    for next in [1usize, 4, 7, 3, 10, 2, 6, 6, 9] {
        let from_left = len % 2 == 0;
        let row = position_separators(next, &phases, from_left, 0);
        assert_eq!(row.len(), next.max(len));
        let removed_left = if from_left { 0 } else { row.len() - next };
        phases = settle_separators(&row, removed_left, next);
        len = next;

        let marked: Vec<usize> = phases
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == Steady)
            .map(|(i, _)| len - i - 1)
            .rev()
            .collect();
        assert_eq!(marked, boundary_positions(len), "after {len} digits");
        assert!(phases.iter().all(|p| matches!(p, Steady | Absent)));
    }
}
