//! Patrol / Combat / Death
//!
//! A guard idles, patrols, fights and eventually dies, driven by a fixed
//! 100 ms frame loop over a manual clock.
//!
//! Key concepts:
//! - States implemented as trait objects and as closures
//! - `enter`/`exit` returning `false` to hold a transition open
//! - A utility table choosing what to do after idling
//! - A final state triggered by the owner's health
//!
//! Run with: RUST_LOG=tickmind=debug cargo run --example patrol

use std::cell::Cell;
use std::rc::Rc;
use tickmind::builder::{StateMachineBuilder, UtilityBlock};
use tickmind::core::{Context, FnState, ManualClock};
use tickmind::{state_ids, State, StateId};
use tracing_subscriber::prelude::*;

state_ids! {
    enum Mode {
        Idle = 0,
        Patrol = 1,
        Combat = 2,
    }
}

const FRAME_SECS: f64 = 0.1;

struct Guard {
    health: u32,
    threat: f32,
}

struct Patrol {
    duration: f64,
}

impl State<Guard> for Patrol {
    fn name(&self) -> &str {
        "Patrol"
    }

    fn update(&mut self, ctx: &mut Context<'_, Guard>) {
        ctx.owner_mut().threat += 0.2;
        if ctx.duration() > self.duration {
            ctx.switch_state(Mode::Combat);
        }
    }
}

struct Combat {
    prepare: f64,
    fight: f64,
    cool_down: f64,
}

impl State<Guard> for Combat {
    fn name(&self) -> &str {
        "Combat"
    }

    fn enter(&mut self, ctx: &mut Context<'_, Guard>) -> bool {
        ctx.duration() >= self.prepare
    }

    fn update(&mut self, ctx: &mut Context<'_, Guard>) {
        let guard = ctx.owner_mut();
        guard.health = guard.health.saturating_sub(7);
        if ctx.duration() > self.fight {
            ctx.switch_state(Mode::Idle);
        }
    }

    fn exit(&mut self, ctx: &mut Context<'_, Guard>) -> bool {
        ctx.owner_mut().threat = 0.0;
        ctx.duration() >= self.cool_down
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Patrol / Combat / Death ===\n");

    // Idle hands its decision to a utility table; the table reads the threat
    // level through a shared cell refreshed every frame.
    let threat = Rc::new(Cell::new(0.0_f32));
    let (to_patrol, to_combat) = (Rc::clone(&threat), Rc::clone(&threat));
    let after_idle = Rc::new(
        UtilityBlock::begin(Cell::new(Mode::Idle))
            .transitions()
            .from(Mode::Idle)
            .to(Mode::Patrol)
            .condition(move || 1.0 - to_patrol.get().min(1.0))
            .to(Mode::Combat)
            .condition(move || to_combat.get())
            .end()
            .finalize()
            .expect("idle table is well formed"),
    );

    let decide = Rc::clone(&after_idle);
    let idle = FnState::<Guard>::new("Idle", move |ctx| {
        if ctx.duration() < 3.0 {
            return;
        }
        if let Some(next) = decide.build() {
            ctx.switch_state(next);
        }
    });

    let clock = ManualClock::new();
    let mut machine = StateMachineBuilder::new()
        .state(Mode::Idle, idle)
        .state(Mode::Patrol, Patrol { duration: 1.5 })
        .state(
            Mode::Combat,
            Combat {
                prepare: 1.5,
                fight: 2.0,
                cool_down: 1.0,
            },
        )
        .final_state(FnState::new("Death", |_| {}), |guard: &Guard| guard.health == 0)
        .initial(Mode::Idle)
        .clock(clock.clone())
        .build(Guard {
            health: 100,
            threat: 0.0,
        })
        .expect("machine configuration is valid");

    let mut reported = StateId::INVALID;
    for frame in 0..400 {
        threat.set(machine.owner().threat);
        machine.tick();
        clock.advance_secs(FRAME_SECS);

        if machine.current_state_id() != reported {
            reported = machine.current_state_id();
            println!(
                "t={:>5.1}s  {}  health={}",
                frame as f64 * FRAME_SECS,
                machine.exec_info(),
                machine.owner().health
            );
        }
        if machine.is_in_final() {
            break;
        }
    }

    println!("\nVisited:");
    for transition in machine.history().iter() {
        let name = |id: StateId| {
            Mode::from_id(id)
                .map(|mode| mode.to_string())
                .unwrap_or_else(|| id.to_string())
        };
        println!(
            "  {:>7} -> {:<7} ({} ticks)",
            name(transition.from),
            name(transition.to),
            transition.ticks
        );
    }

    println!("\n=== Example Complete ===");
}
