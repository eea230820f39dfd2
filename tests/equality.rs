use eqsmt::cnf::{Clause, Literal};
use eqsmt::config::SolverConfig;
use eqsmt::parse;
use eqsmt::session::Session;
use eqsmt::strategy::{IntegrationStrategy, Status};

mod common;

fn run_all(is_sat: bool) {
    for (case, input) in common::get_tests_for("equality", is_sat) {
        let session = match parse::from_string(input) {
            Ok(session) => session,
            Err(e) => panic!("{}: {}", case.name, e),
        };
        for strategy in IntegrationStrategy::ALL {
            eprintln!("{} ({})", case.name, strategy);
            let config = SolverConfig::default().with_strategy(strategy);
            match strategy.run(&session, &config) {
                Ok(outcome) => common::check(&case, &session, &outcome),
                Err(e) => panic!("{}: {}", case.name, e),
            }
        }
    }
}

#[test]
fn test_sat() {
    run_all(true);
}

#[test]
fn test_unsat() {
    run_all(false);
}

fn lits(ids: &[isize]) -> Vec<Literal> {
    ids.iter().map(|&id| Literal::new(id)).collect()
}

#[test]
fn transitive_chain_is_accepted_first_time() {
    let session = Session::builder()
        .variables(["x1", "x2", "x3", "x4"])
        .equality(1, "x1", "x2")
        .equality(2, "x2", "x3")
        .equality(3, "x3", "x4")
        .clauses(vec![vec![1], vec![2], vec![3]])
        .build()
        .unwrap();

    for strategy in IntegrationStrategy::ALL {
        let outcome = strategy
            .run(&session, &SolverConfig::default())
            .unwrap_or_else(|e| panic!("{}: {}", strategy, e));
        assert_eq!(Status::Sat, outcome.status, "{}", strategy);
        assert_eq!(Some(lits(&[1, 2, 3])), outcome.model, "{}", strategy);
        assert_eq!(0, outcome.lemmas, "{}", strategy);
    }
}

#[test]
fn broken_cycle_learns_one_lemma() {
    let session = Session::builder()
        .variables(["x1", "x2", "x3", "x4"])
        .equality(1, "x1", "x2")
        .equality(2, "x2", "x3")
        .equality(3, "x3", "x4")
        .equality(4, "x4", "x1")
        .clauses(vec![vec![1], vec![2], vec![3], vec![-4]])
        .build()
        .unwrap();

    for strategy in IntegrationStrategy::ALL {
        let config = SolverConfig::default().with_strategy(strategy);
        let outcome = strategy.run(&session, &config).unwrap();
        assert_eq!(Status::Unsat, outcome.status, "{}", strategy);
        assert_eq!(None, outcome.model, "{}", strategy);
        assert_eq!(
            &[Clause::new(vec![-1, -2, -3, 4])],
            outcome.learned(),
            "{}",
            strategy
        );
    }
}

#[test]
fn lazy_loop_blocks_rejected_models() {
    let session = Session::builder()
        .variables(["x1", "x2", "x3", "x4"])
        .equality(1, "x1", "x4")
        .equality(2, "x1", "x2")
        .equality(3, "x1", "x3")
        .equality(4, "x2", "x4")
        .equality(5, "x3", "x4")
        .equality(6, "x2", "x3")
        .clauses(vec![vec![1], vec![2, -3, -4], vec![5, 4], vec![-2, 6]])
        .build()
        .unwrap();

    let outcome = IntegrationStrategy::Lazy
        .run(&session, &SolverConfig::default())
        .unwrap();

    assert_eq!(Status::Sat, outcome.status);
    assert!(outcome.lemmas >= 1);
    assert_eq!(Clause::new(vec![-1, 2, 3, -4, 5, 6]), outcome.learned()[0]);
    assert_eq!(outcome.lemmas + 1, outcome.theory_checks);

    let model = outcome.model.as_ref().unwrap();
    common::check_model(&session, &model);
    for lemma in outcome.learned() {
        assert!(common::satisfies(
            &eqsmt::cnf::Formula::new(vec![lemma.clone()]),
            &model
        ));
    }
}

#[test]
fn strategies_agree_on_the_status() {
    for (_, input) in common::get_tests_for("equality", true)
        .into_iter()
        .chain(common::get_tests_for("equality", false))
    {
        let session = parse::from_string(input).unwrap();
        let statuses: Vec<Status> = IntegrationStrategy::ALL
            .iter()
            .map(|&strategy| {
                let config = SolverConfig::default().with_strategy(strategy);
                strategy.run(&session, &config).unwrap().status
            })
            .collect();
        assert!(statuses.iter().all(|&s| s == statuses[0]), "{:?}", statuses);
    }
}

#[test]
fn positive_phase_still_finds_valid_models() {
    for (case, input) in common::get_tests_for("equality", true) {
        let session = parse::from_string(input).unwrap();
        for strategy in IntegrationStrategy::ALL {
            let config = SolverConfig {
                phase: true,
                ..SolverConfig::default().with_strategy(strategy)
            };
            let outcome = strategy.run(&session, &config).unwrap();
            common::check(&case, &session, &outcome);
        }
    }
}

#[test]
fn refinement_limit_gives_unknown() {
    let input = common::get_tests_for("equality", false)
        .into_iter()
        .find(|(case, _)| case.name == "tseitin.txt")
        .map(|(_, input)| input)
        .unwrap();
    let session = parse::from_string(input).unwrap();
    let config = SolverConfig {
        refinement_limit: Some(0),
        ..SolverConfig::default()
    };

    let outcome = IntegrationStrategy::Lazy.run(&session, &config).unwrap();
    assert_eq!(Status::Unknown, outcome.status);
    assert_eq!(None, outcome.model);
}

#[test]
fn classes_name_the_variables() {
    let session = Session::builder()
        .variables(["d", "a", "b", "c"])
        .equality(1, "a", "b")
        .equality(2, "b", "c")
        .clauses(vec![vec![1], vec![2]])
        .build()
        .unwrap();
    let outcome = IntegrationStrategy::Callback
        .run(&session, &SolverConfig::default())
        .unwrap();

    let classes = session.describe_model(&outcome.model.unwrap());
    assert!(classes.contains(&vec!["a".to_string(), "b".to_string(), "c".to_string()]));
    assert!(classes.contains(&vec!["d".to_string()]));
}

#[test]
fn decision_limit_ignores_model_completion() {
    let session = Session::builder()
        .variables(["a", "b", "c"])
        .equality(1, "a", "b")
        .equality(2, "b", "c")
        .clauses(vec![vec![1]])
        .build()
        .unwrap();

    for strategy in IntegrationStrategy::ALL {
        let config = SolverConfig {
            decision_limit: Some(0),
            ..SolverConfig::default().with_strategy(strategy)
        };
        let outcome = strategy.run(&session, &config).unwrap();
        assert_eq!(Status::Sat, outcome.status, "{}", strategy);
        assert_eq!(Some(lits(&[1, -2])), outcome.model, "{}", strategy);
    }
}
