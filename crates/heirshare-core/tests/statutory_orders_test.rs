use heirshare_core::{
    EngineConfig, HeirForest, StatutoryEngine, SuccessionError, WinningOrder, compute_initial_shares,
};
use heirshare_types::{Fraction, Heir, Relationship, ShareMap};

fn heir(id: &str, relationship: Relationship) -> Heir {
    Heir::new(id, id.to_uppercase(), relationship)
}

fn child(id: &str) -> Heir {
    heir(id, Relationship::Child)
}

fn shares(heirs: &[Heir]) -> ShareMap {
    compute_initial_shares(&HeirForest::from_heirs(heirs).unwrap()).unwrap()
}

fn winning(heirs: &[Heir]) -> WinningOrder {
    StatutoryEngine::default()
        .distribute(&HeirForest::from_heirs(heirs).unwrap())
        .unwrap()
        .winning_order
}

fn f(n: i64, d: i64) -> Fraction {
    Fraction::new(n, d)
}

#[test]
fn children_preempt_parents() {
    let heirs = [child("c"), heir("p", Relationship::Parent)];
    let shares = shares(&heirs);
    assert_eq!(shares["c"], Fraction::ONE);
    assert_eq!(shares["p"], Fraction::ZERO);
    assert_eq!(winning(&heirs), WinningOrder::Descendants);
}

#[test]
fn grandchildren_represent_deceased_child() {
    let shares = shares(&[child("c").deceased().with_descendants(vec![child("g1"), child("g2")])]);
    assert_eq!(shares["c"], Fraction::ZERO);
    assert_eq!(shares["g1"], Fraction::HALF);
    assert_eq!(shares["g2"], Fraction::HALF);
}

#[test]
fn spouse_shares_equally_with_children() {
    let shares = shares(&[
        heir("s", Relationship::Spouse),
        child("a"),
        child("b"),
        child("dead").deceased(),
    ]);
    assert_eq!(shares["s"], f(1, 3));
    assert_eq!(shares["a"], f(1, 3));
    assert_eq!(shares["b"], f(1, 3));
    assert_eq!(shares["dead"], Fraction::ZERO);
}

#[test]
fn separate_half_then_child_takes_the_rest() {
    let heirs = [heir("s", Relationship::Spouse).with_separate_half(), child("c")];
    let shares = shares(&heirs);
    assert_eq!(shares["s"], Fraction::HALF);
    assert_eq!(shares["c"], Fraction::HALF);
}

#[test]
fn separate_half_spouse_can_also_share_when_configured() {
    let config = EngineConfig { spouse_half_excludes_orders: false, ..EngineConfig::default() };
    let forest = HeirForest::from_heirs(&[
        heir("s", Relationship::Spouse).with_separate_half(),
        child("c"),
    ])
    .unwrap();
    let shares = StatutoryEngine::new(config).distribute(&forest).unwrap().shares;
    assert_eq!(shares["s"], f(3, 4));
    assert_eq!(shares["c"], f(1, 4));
}

#[test]
fn separate_half_alone_leaves_the_rest_unassigned() {
    let forest = HeirForest::from_heirs(&[heir("s", Relationship::Spouse).with_separate_half()]).unwrap();
    let distribution = StatutoryEngine::default().distribute(&forest).unwrap();
    assert_eq!(distribution.shares["s"], Fraction::HALF);
    assert_eq!(distribution.winning_order, WinningOrder::SeparateHalfOnly);
    assert_eq!(distribution.unassigned, Fraction::HALF);
}

#[test]
fn spouse_alone_takes_everything() {
    let heirs = [heir("s", Relationship::Spouse)];
    assert_eq!(shares(&heirs)["s"], Fraction::ONE);
    assert_eq!(winning(&heirs), WinningOrder::SpouseOnly);
}

#[test]
fn deceased_spouse_takes_nothing() {
    let shares = shares(&[heir("s", Relationship::Spouse).deceased(), child("c")]);
    assert_eq!(shares["s"], Fraction::ZERO);
    assert_eq!(shares["c"], Fraction::ONE);
}

#[test]
fn spouse_and_parents_split_half_and_half() {
    let heirs = [
        heir("s", Relationship::Spouse),
        heir("m", Relationship::Parent),
        heir("d", Relationship::Parent),
    ];
    let shares = shares(&heirs);
    assert_eq!(shares["s"], Fraction::HALF);
    assert_eq!(shares["m"], f(1, 4));
    assert_eq!(shares["d"], f(1, 4));
    assert_eq!(winning(&heirs), WinningOrder::Parents);
}

#[test]
fn deceased_parent_without_issue_leaves_the_line_to_the_other_parent() {
    let shares = shares(&[
        heir("s", Relationship::Spouse),
        heir("m", Relationship::Parent),
        heir("d", Relationship::Parent).deceased(),
    ]);
    assert_eq!(shares["s"], Fraction::HALF);
    assert_eq!(shares["m"], Fraction::HALF);
    assert_eq!(shares["d"], Fraction::ZERO);
}

#[test]
fn siblings_represent_deceased_parent() {
    let shares = shares(&[
        heir("m", Relationship::Parent),
        heir("d", Relationship::Parent)
            .deceased()
            .with_descendants(vec![child("sib1"), child("sib2")]),
    ]);
    assert_eq!(shares["m"], Fraction::HALF);
    assert_eq!(shares["sib1"], f(1, 4));
    assert_eq!(shares["sib2"], f(1, 4));
}

#[test]
fn grandparents_split_by_side_then_slot() {
    let heirs = [
        heir("pgf", Relationship::PaternalGrandfather),
        heir("pgm", Relationship::PaternalGrandmother),
        heir("mgf", Relationship::MaternalGrandfather),
        heir("mgm", Relationship::MaternalGrandmother).deceased(),
    ];
    let shares = shares(&heirs);
    assert_eq!(shares["pgf"], f(1, 4));
    assert_eq!(shares["pgm"], f(1, 4));
    assert_eq!(shares["mgf"], Fraction::HALF);
    assert_eq!(shares["mgm"], Fraction::ZERO);
    assert_eq!(winning(&heirs), WinningOrder::Grandparents);
}

#[test]
fn one_eligible_grandparent_side_takes_the_whole_share() {
    let shares = shares(&[
        heir("s", Relationship::Spouse),
        heir("pgf", Relationship::PaternalGrandfather).deceased(),
        heir("mgm", Relationship::MaternalGrandmother),
    ]);
    assert_eq!(shares["s"], Fraction::HALF);
    assert_eq!(shares["mgm"], Fraction::HALF);
}

#[test]
fn grandparent_line_passes_to_aunts_and_uncles() {
    let shares = shares(&[
        heir("pgf", Relationship::PaternalGrandfather)
            .deceased()
            .with_descendants(vec![child("uncle"), child("aunt").deceased().with_descendants(vec![child("cousin")])]),
        heir("pgm", Relationship::PaternalGrandmother),
    ]);
    assert_eq!(shares["pgm"], Fraction::HALF);
    assert_eq!(shares["uncle"], f(1, 4));
    assert_eq!(shares["cousin"], f(1, 4));
}

#[test]
fn great_grandparents_split_by_side_pair_and_slot() {
    let heirs = [
        heir("a", Relationship::PaternalGrandfatherFather),
        heir("b", Relationship::PaternalGrandfatherMother),
        heir("c", Relationship::PaternalGrandmotherFather),
        heir("d", Relationship::MaternalGrandmotherMother),
    ];
    let shares = shares(&heirs);
    assert_eq!(shares["a"], f(1, 8));
    assert_eq!(shares["b"], f(1, 8));
    assert_eq!(shares["c"], f(1, 4));
    assert_eq!(shares["d"], Fraction::HALF);
    assert_eq!(winning(&heirs), WinningOrder::GreatGrandparents);
}

#[test]
fn great_grandparents_with_spouse() {
    let shares = shares(&[
        heir("s", Relationship::Spouse),
        heir("a", Relationship::MaternalGrandfatherFather),
        heir("b", Relationship::MaternalGrandfatherMother),
    ]);
    assert_eq!(shares["s"], Fraction::HALF);
    assert_eq!(shares["a"], f(1, 4));
    assert_eq!(shares["b"], f(1, 4));
}

#[test]
fn grandparents_preempt_great_grandparents() {
    let shares = shares(&[
        heir("mgf", Relationship::MaternalGrandfather),
        heir("a", Relationship::PaternalGrandfatherFather),
    ]);
    assert_eq!(shares["mgf"], Fraction::ONE);
    assert_eq!(shares["a"], Fraction::ZERO);
}

#[test]
fn nobody_eligible_escheats() {
    let heirs = [heir("p", Relationship::Parent).deceased(), child("c").renouncing()];
    let forest = HeirForest::from_heirs(&heirs).unwrap();
    let distribution = StatutoryEngine::default().distribute(&forest).unwrap();
    assert!(distribution.shares.values().all(Fraction::is_zero));
    assert_eq!(distribution.winning_order, WinningOrder::Escheat);
    assert_eq!(distribution.unassigned, Fraction::ONE);
}

#[test]
fn renouncing_child_does_not_pass_the_share_down() {
    let shares = shares(&[
        child("a").renouncing().with_descendants(vec![child("a1")]),
        child("b"),
    ]);
    assert_eq!(shares["a"], Fraction::ZERO);
    assert_eq!(shares["a1"], Fraction::ZERO);
    assert_eq!(shares["b"], Fraction::ONE);
}

#[test]
fn representation_skips_dead_generations() {
    let shares = shares(&[
        child("a"),
        child("b").deceased().with_descendants(vec![
            child("b1").deceased().with_descendants(vec![child("b11"), child("b12").deceased()]),
            child("b2").deceased(),
        ]),
    ]);
    assert_eq!(shares["a"], Fraction::HALF);
    assert_eq!(shares["b11"], Fraction::HALF);
    assert_eq!(shares["b12"], Fraction::ZERO);
    assert_eq!(shares["b2"], Fraction::ZERO);
}

#[test]
fn every_heir_appears_in_the_map() {
    let forest = HeirForest::from_heirs(&[
        heir("s", Relationship::Spouse),
        child("a").with_descendants(vec![child("a1")]),
        heir("p", Relationship::Parent),
    ])
    .unwrap();
    let shares = compute_initial_shares(&forest).unwrap();
    assert_eq!(shares.len(), forest.len());
    assert_eq!(shares["a1"], Fraction::ZERO);
}

#[test]
fn empty_forest_yields_empty_map() {
    assert!(shares(&[]).is_empty());
}

#[test]
fn duplicate_ancestor_slot_is_a_forest_error() {
    let forest = HeirForest::from_heirs(&[
        heir("g1", Relationship::MaternalGrandmother),
        heir("g2", Relationship::MaternalGrandmother),
    ])
    .unwrap();
    let err = compute_initial_shares(&forest).unwrap_err();
    assert!(matches!(err, SuccessionError::Forest { .. }));
    assert_eq!(err.heir_id(), Some("g2"));
}
