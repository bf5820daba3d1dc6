//! Verification regression test
//!
//! Feeds hand-made faulty labelings to the checks and makes sure each fault
//! is reported with the right kind and position.
//!
//! Run with:
//! ```
//! cargo test -p ccl-label --test verify_reg
//! ```

use ccl_label::{
    StrategyKind, Violation, canonicalize, check_equivalent, check_partition, check_result,
    equivalent_result, label, partition_equivalent, valid_result,
};
use ccl_test::{RegParams, hourglass, parse_grid, random_grid, setup_logging};

#[test]
fn verify_reg() {
    setup_logging("error");
    let mut rp = RegParams::new("verify");

    // -----------------------------------------------------------
    // check_result
    // -----------------------------------------------------------

    let good = parse_grid(
        r"
        22.3
        ...3
        4.33
        ",
    )
    .unwrap();
    rp.check(check_result(&good).is_ok(), "good labeling accepted");

    let sentinel = parse_grid(
        r"
        22.3
        ...#
        4.33
        ",
    )
    .unwrap();
    rp.check(
        check_result(&sentinel) == Err(Violation::Unlabeled { x: 3, y: 1 }),
        "sentinel reported",
    );

    let split = parse_grid(
        r"
        22.3
        ...5
        4.33
        ",
    )
    .unwrap();
    rp.check(
        check_result(&split) == Err(Violation::CloseFault { x: 3, y: 0 }),
        "close fault reported",
    );

    let shared = parse_grid(
        r"
        22.3
        ...3
        2.33
        ",
    )
    .unwrap();
    rp.check(
        check_result(&shared)
            == Err(Violation::DuplicateLabel {
                label: 2,
                x: 0,
                y: 2,
            }),
        "duplicate label reported",
    );

    // The checks never modify their input
    let before = shared.clone();
    rp.check(!valid_result(&shared), "shared label rejected");
    rp.compare_grids(&before, &shared);

    // -----------------------------------------------------------
    // equivalent_result vs partition_equivalent
    // -----------------------------------------------------------

    let a = parse_grid("2.3\n2.3").unwrap();
    let renamed = parse_grid("9.4\n9.4").unwrap();
    let merged = parse_grid("5.5\n5.5").unwrap();
    let grown = parse_grid("2.3\n223").unwrap();

    rp.check(equivalent_result(&a, &renamed), "renamed equivalent");
    rp.check(partition_equivalent(&a, &renamed), "renamed same partition");
    rp.check(equivalent_result(&a, &merged), "merged equivalent by mask");
    rp.check(
        check_partition(&a, &merged) == Err(Violation::PartitionMismatch { x: 2, y: 0 }),
        "merged partition differs",
    );
    rp.check(
        check_equivalent(&a, &grown) == Err(Violation::ForegroundMismatch { x: 1, y: 1 }),
        "grown mask differs",
    );
    let wide = parse_grid("2.3.").unwrap();
    rp.check(
        matches!(
            check_equivalent(&a, &wide),
            Err(Violation::SizeMismatch { .. })
        ),
        "size mismatch reported",
    );

    // -----------------------------------------------------------
    // canonicalize
    // -----------------------------------------------------------

    let grid = random_grid(40, 30, 0.55, 99);
    let uf = label(StrategyKind::UnionFind, &grid).unwrap();
    let lts = label(StrategyKind::LinearTwoScan, &grid).unwrap();
    rp.compare_grids(&canonicalize(&uf), &canonicalize(&lts));
    rp.compare_grids(
        &canonicalize(&label(StrategyKind::OnePass, &grid).unwrap()),
        &canonicalize(&uf),
    );

    // one-pass already numbers components by first appearance
    let op = label(StrategyKind::OnePass, &hourglass()).unwrap();
    rp.compare_grids(&op, &canonicalize(&op));

    assert!(rp.cleanup(), "verify regression test failed");
}
