//! Fuzzy Threat Assessment
//!
//! Two fuzzy variables, the guard's health and the number of enemies nearby,
//! are evaluated and turned into a decision. The same degrees then score a
//! utility table.
//!
//! Key concepts:
//! - Trapezoid and triangle membership functions
//! - Dominant-set queries (`is_low`, `is_medium`, `is_high`)
//! - Centroid defuzzification into a crisp value
//! - Weighted utilities as table conditions
//!
//! Run with: cargo run --example fuzzy

use std::cell::Cell;
use std::rc::Rc;
use tickmind::builder::UtilityBlock;
use tickmind::scoring::{
    weighted_utility, ScoringError, TrapezoidShape, TriangleShape, Variable,
};
use tracing_subscriber::prelude::*;

fn report(label: &str, variable: &Variable) {
    let degrees = variable.degrees();
    println!("{label}:");
    println!(
        "  low={:.3} medium={:.3} high={:.3} crisp={:.3}",
        degrees.low,
        degrees.medium,
        degrees.high,
        variable.crisp_value()
    );
}

fn main() -> Result<(), ScoringError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Fuzzy Threat Assessment ===\n");

    let mut health = Variable::new(
        TrapezoidShape::new(0.0, 0.0, 30.0, 50.0)?,
        TriangleShape::new(30.0, 50.0, 70.0)?,
        TrapezoidShape::new(50.0, 70.0, 100.0, 100.0)?,
    );
    let mut enemies = Variable::new(
        TrapezoidShape::new(0.0, 0.0, 2.0, 4.0)?,
        TriangleShape::new(2.0, 5.0, 8.0)?,
        TrapezoidShape::new(6.0, 8.0, 10.0, 10.0)?,
    );

    health.evaluate(45.0);
    enemies.evaluate(3.0);
    report("Health (45)", &health);
    report("Enemies (3)", &enemies);

    let decision = if health.is_high() && enemies.is_low() {
        "fight"
    } else if health.is_low() || enemies.is_high() {
        "flee"
    } else {
        "be cautious, assess further"
    };
    println!("\nDecision: {decision}\n");

    // Utility version of the same rules, evaluated over a range of health values.
    let (health, enemies) = (Rc::new(health), Rc::new(enemies));
    let hp = Rc::new(Cell::new(45.0_f32));
    let count = Rc::new(Cell::new(3.0_f32));

    let fight = {
        let (health, enemies, hp, count) =
            (Rc::clone(&health), Rc::clone(&enemies), Rc::clone(&hp), Rc::clone(&count));
        move || {
            let factors = [health.fuzzify(hp.get()).high, enemies.fuzzify(count.get()).low];
            weighted_utility(&factors, &[1.0, 1.0]).unwrap_or(0.0)
        }
    };
    let flee = {
        let (health, enemies, hp, count) =
            (Rc::clone(&health), Rc::clone(&enemies), Rc::clone(&hp), Rc::clone(&count));
        move || {
            let factors = [health.fuzzify(hp.get()).low, enemies.fuzzify(count.get()).high];
            weighted_utility(&factors, &[2.0, 1.0]).unwrap_or(0.0)
        }
    };
    let cautious = {
        let (health, hp) = (Rc::clone(&health), Rc::clone(&hp));
        move || health.fuzzify(hp.get()).medium
    };

    let table = UtilityBlock::begin(Cell::new("Assess"))
        .transitions()
        .from("Assess")
        .to("Fight")
        .condition(fight)
        .to("Flee")
        .condition(flee)
        .to("Cautious")
        .condition(cautious)
        .end()
        .finalize()
        .expect("assessment table is well formed");

    for value in [10.0, 45.0, 60.0, 90.0] {
        hp.set(value);
        match table.best() {
            Some((choice, score)) => println!("health={value:>5.1}  -> {choice:<8} ({score:.3})"),
            None => println!("health={value:>5.1}  -> no decision"),
        }
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
