//! Cross-strategy tests
//!
//! Every built-in strategy must keep to the negotiator contract against every
//! other one: only permutations of the item universe, and agreements scored
//! with each side's own utility.

use negotiation_sim_core::models::{Offer, PreferenceOrder};
use negotiation_sim_core::negotiator::{Negotiator, StrategyKind, ThresholdLinear};
use negotiation_sim_core::{negotiate, RngManager};

const ITEMS: [&str; 5] = ["a", "b", "c", "d", "e"];
const SHUFFLED: [&str; 5] = ["d", "e", "b", "a", "c"];

fn prefs(items: &[&str]) -> PreferenceOrder {
    PreferenceOrder::new(items.iter().map(|s| s.to_string()).collect()).unwrap()
}

fn assert_permutations(negotiator: &dyn Negotiator) {
    for offer in negotiator.state().own_offers() {
        negotiator
            .preferences()
            .validate(offer)
            .unwrap_or_else(|e| panic!("{} produced {:?}: {}", negotiator.name(), offer, e));
    }
}

#[test]
fn test_all_pairings_respect_the_contract() {
    for &kind_a in StrategyKind::ALL.iter() {
        for &kind_b in StrategyKind::ALL.iter() {
            let mut a = kind_a.build();
            let mut b = kind_b.build();
            a.initialize(prefs(&ITEMS), 20).unwrap();
            b.initialize(prefs(&SHUFFLED), 20).unwrap();
            let mut rng = RngManager::new(2024);

            for _ in 0..3 {
                let result = negotiate(20, a.as_mut(), b.as_mut(), &mut rng)
                    .unwrap_or_else(|e| panic!("{} vs. {}: {}", kind_a, kind_b, e));
                a.receive_results(&result);
                b.receive_results(&result);

                if let Some(agreed) = &result.agreed_offer {
                    assert!(result.succeeded);
                    assert_eq!(result.points_a, a.state().evaluate(agreed).unwrap());
                    assert_eq!(result.points_b, b.state().evaluate(agreed).unwrap());
                } else {
                    assert_eq!(result.points_a, -5.0);
                    assert_eq!(result.points_b, -5.0);
                    assert_eq!(result.iterations_used, 20);
                }
            }

            assert_permutations(a.as_ref());
            assert_permutations(b.as_ref());
            assert_eq!(a.state().past_results().len(), 3);
            assert_eq!(a.state().iterations(), 0);
        }
    }
}

#[test]
fn test_every_strategy_opens_with_its_preferences() {
    for kind in StrategyKind::ALL {
        let mut negotiator = kind.build();
        negotiator.initialize(prefs(&ITEMS), 10).unwrap();
        let opening = negotiator.make_offer(None, &mut RngManager::new(1)).unwrap();

        assert_eq!(opening, prefs(&ITEMS).to_offer(), "{}", kind);
        assert!(negotiator.state().was_a());
        assert!((negotiator.utility() - negotiator.state().max_utility()).abs() < 1e-9);
    }
}

#[test]
fn test_every_strategy_rejects_foreign_offers() {
    let foreign = Offer::from(vec!["a", "b", "c", "d", "z"]);
    for kind in StrategyKind::ALL {
        let mut negotiator = kind.build();
        negotiator.initialize(prefs(&ITEMS), 10).unwrap();
        assert!(
            negotiator
                .make_offer(Some(&foreign), &mut RngManager::new(1))
                .is_err(),
            "{} accepted a foreign offer",
            kind
        );
    }
}

#[test]
fn test_linear_threshold_decays_to_floor() {
    let mut negotiator = ThresholdLinear::new();
    negotiator.initialize(prefs(&ITEMS), 12).unwrap();
    let mut rng = RngManager::new(3);
    let reversed = Offer::from(vec!["e", "d", "c", "b", "a"]);

    let floor = 0.1 * negotiator.state().max_utility();
    let mut previous = f64::INFINITY;
    for _ in 0..11 {
        negotiator.make_offer(Some(&reversed), &mut rng).unwrap();
        let current = negotiator.state().threshold().current();
        assert!(current <= previous);
        assert!(current >= floor - 1e-9);
        previous = current;
    }
}

#[test]
fn test_constant_never_concedes() {
    let mut negotiator = StrategyKind::Constant.build();
    negotiator.initialize(prefs(&ITEMS), 5).unwrap();
    let mut rng = RngManager::new(3);
    let theirs = prefs(&SHUFFLED).to_offer();

    for _ in 0..5 {
        let offer = negotiator.make_offer(Some(&theirs), &mut rng).unwrap();
        assert_eq!(offer, prefs(&ITEMS).to_offer());
    }
}
