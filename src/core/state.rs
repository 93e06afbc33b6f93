//! The `State` capability and a closure-backed implementation.
//!
//! States are units of behavior registered with a
//! [`StateMachine`](crate::StateMachine). The machine lends its owner to
//! every callback through a [`Context`], so a state never stores a reference
//! to the entity it drives.

use super::context::Context;
use std::fmt;

/// Behavior bound to one state id.
///
/// Every method has a default: `enter` and `exit` succeed immediately and
/// `update` does nothing. Returning `false` from `enter` or `exit` holds the
/// machine mid-transition; the same call is retried on the next tick. This is
/// how a state waits for an animation or a cooldown before letting go.
///
/// # Example
///
/// ```rust
/// use tickmind::core::{Context, State};
///
/// struct Cooldown {
///     seconds: f64,
/// }
///
/// impl<O> State<O> for Cooldown {
///     fn name(&self) -> &str {
///         "Cooldown"
///     }
///
///     fn exit(&mut self, ctx: &mut Context<'_, O>) -> bool {
///         ctx.duration() >= self.seconds
///     }
/// }
/// ```
pub trait State<O> {
    /// Name used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called once per tick until it returns `true`.
    fn enter(&mut self, _ctx: &mut Context<'_, O>) -> bool {
        true
    }

    /// Called once per tick while the state is active and nothing is pending.
    fn update(&mut self, _ctx: &mut Context<'_, O>) {}

    /// Called once per tick until it returns `true`.
    fn exit(&mut self, _ctx: &mut Context<'_, O>) -> bool {
        true
    }
}

type GateFn<O> = Box<dyn FnMut(&mut Context<'_, O>) -> bool>;
type UpdateFn<O> = Box<dyn FnMut(&mut Context<'_, O>)>;

/// A [`State`] assembled from a name and closures.
///
/// `update` is required; `enter` and `exit` default to immediate success.
///
/// # Example
///
/// ```rust
/// use tickmind::core::FnState;
///
/// let idle = FnState::<u32>::new("Idle", |ctx| *ctx.owner_mut() += 1)
///     .on_exit(|ctx| ctx.duration() > 0.5);
/// ```
pub struct FnState<O> {
    name: String,
    enter: Option<GateFn<O>>,
    update: UpdateFn<O>,
    exit: Option<GateFn<O>>,
}

impl<O> FnState<O> {
    pub fn new<U>(name: impl Into<String>, update: U) -> Self
    where
        U: FnMut(&mut Context<'_, O>) + 'static,
    {
        Self {
            name: name.into(),
            enter: None,
            update: Box::new(update),
            exit: None,
        }
    }

    pub fn on_enter<F>(mut self, enter: F) -> Self
    where
        F: FnMut(&mut Context<'_, O>) -> bool + 'static,
    {
        self.enter = Some(Box::new(enter));
        self
    }

    pub fn on_exit<F>(mut self, exit: F) -> Self
    where
        F: FnMut(&mut Context<'_, O>) -> bool + 'static,
    {
        self.exit = Some(Box::new(exit));
        self
    }
}

impl<O> State<O> for FnState<O> {
    fn name(&self) -> &str {
        &self.name
    }

    fn enter(&mut self, ctx: &mut Context<'_, O>) -> bool {
        self.enter.as_mut().map_or(true, |enter| enter(ctx))
    }

    fn update(&mut self, ctx: &mut Context<'_, O>) {
        (self.update)(ctx)
    }

    fn exit(&mut self, ctx: &mut Context<'_, O>) -> bool {
        self.exit.as_mut().map_or(true, |exit| exit(ctx))
    }
}

impl<O> fmt::Debug for FnState<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnState")
            .field("name", &self.name)
            .field("enter", &self.enter.is_some())
            .field("exit", &self.exit.is_some())
            .finish()
    }
}
