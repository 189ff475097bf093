use agm::{
    belief::{
        base::Belief,
        partial_meet::PartialMeetContractor,
        postulates::verify_postulates,
        store::{BeliefStore, Contraction, Expansion, Repair},
    },
    config::{ExpansionPolicy, Priority},
    error::LimitExceeded,
    explanation::Explain,
    propositional_logic::solvers::resolution::ResolutionSolver,
};
use colored::Colorize;

fn seed(
    store: &mut BeliefStore,
    beliefs: &[(&str, Priority)],
    explanation: &mut impl Explain,
) -> Result<(), LimitExceeded> {
    for &(formula, priority) in beliefs {
        let expansion = store.expand(formula, priority, explanation)?;
        if expansion == Expansion::Rejected {
            println!("{} {}", "Rejected".red(), formula);
        }
    }

    println!("Belief base: {store}");
    Ok(())
}

fn print_entailment(
    store: &BeliefStore,
    query: &str,
    explanation: &mut impl Explain,
) -> Result<(), LimitExceeded> {
    let entailed = store.entails(query, explanation)?;
    println!(
        "entails({}) = {}",
        query.blue(),
        if entailed {
            "true".green()
        } else {
            "false".red()
        }
    );

    Ok(())
}

fn format_beliefs(beliefs: &[Belief]) -> String {
    let formulas = beliefs
        .iter()
        .map(|belief| belief.formula())
        .collect::<Vec<_>>();
    format!("{{{}}}", formulas.join(", "))
}

pub fn entailment(
    store: &mut BeliefStore,
    explanation: &mut impl Explain,
) -> Result<(), LimitExceeded> {
    seed(store, &[("A", 0), ("A => B", 0)], explanation)?;

    print_entailment(store, "B", explanation)?;
    print_entailment(store, "C", explanation)
}

pub fn revision(
    store: &mut BeliefStore,
    explanation: &mut impl Explain,
) -> Result<(), LimitExceeded> {
    seed(store, &[("A", 1), ("A => B", 0)], explanation)?;
    print_entailment(store, "B", explanation)?;

    match store.contract("B", explanation)? {
        Contraction::Withdrew(belief) => {
            println!("contract(B) withdrew {}", belief.to_string().red())
        }
        outcome => println!("contract(B): {outcome:?}"),
    }
    println!("Belief base: {store}");
    print_entailment(store, "B", explanation)?;

    let revision = store.revise_default("~B", explanation)?;
    println!("revise(~B): {:?}, {:?}", revision.contraction, revision.expansion);
    println!("Belief base: {store}");

    // Under the guarded policy a plain expansion by B would be rejected now.
    let revision = store.revise_default("B", explanation)?;
    println!("revise(B): {:?}, {:?}", revision.contraction, revision.expansion);
    println!("Belief base: {store}");
    print_entailment(store, "B", explanation)
}

pub fn postulates(
    store: &mut BeliefStore,
    formula: &str,
    explanation: &mut impl Explain,
) -> Result<(), LimitExceeded> {
    seed(store, &[("p", 1), ("p => q", 0)], explanation)?;

    let report = verify_postulates(store, formula, store.config().default_priority, explanation)?;
    println!("Expanding by {}:\n{report}", formula.blue());

    Ok(())
}

pub fn partial_meet(
    store: &mut BeliefStore,
    target: &str,
    explanation: &mut impl Explain,
) -> Result<(), LimitExceeded> {
    seed(
        store,
        &[("p", 2), ("p => q", 1), ("q | p", 0), ("p & q", 0)],
        explanation,
    )?;

    let oracle = ResolutionSolver::with_limit(store.config().resolution_limit);
    let contractor = PartialMeetContractor::from_config(oracle, store.config());
    let remainders = contractor.remainders(store.base(), target, explanation)?;

    println!("Remainders by {}:", target.blue());
    for remainder in remainders.iter() {
        println!("- {}", format_beliefs(remainder));
    }
    println!("Full meet: {}", format_beliefs(&remainders.full_meet()).green());
    println!(
        "Meet by priority: {}",
        format_beliefs(&remainders.meet_by_priority()).green()
    );

    Ok(())
}

pub fn auto_fix(
    store: &mut BeliefStore,
    explanation: &mut impl Explain,
) -> Result<(), LimitExceeded> {
    if store.config().expansion == ExpansionPolicy::Guarded {
        println!("The guarded policy keeps bases consistent, seeding with the permissive one.");
        *store = BeliefStore::with_config(
            store
                .config()
                .clone()
                .with_expansion(ExpansionPolicy::Permissive),
        );
    }

    seed(store, &[("A", 0), ("~A", 0), ("B", 1)], explanation)?;

    match store.auto_fix(explanation)? {
        Repair::AlreadyConsistent => println!("Already consistent."),
        Repair::Repaired(removed) => {
            println!("Repaired by withdrawing {}", format_beliefs(&removed).red())
        }
        Repair::Failed { removed } => println!(
            "{} after withdrawing {}",
            "Still inconsistent".red(),
            format_beliefs(&removed)
        ),
    }
    println!("Belief base: {store}");

    Ok(())
}
