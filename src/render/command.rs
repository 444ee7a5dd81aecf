//! Render commands queued by actors.
//!
//! Actors never call into the render loop while their own state is
//! borrowed. Commands and tick handlers queue `RenderCommand`s instead, and
//! the actor dispatches them once the borrow is released.

use super::{Backdrop, Costume, DirtyFlags, RenderLoop, RendererProps, SoundRequest};
use crate::actor::ActorId;

/// A deferred call into the render loop.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Publish a sprite's props.
    Draw {
        /// Props to draw.
        props: Box<RendererProps>,
        /// What changed since the last draw.
        changed: DirtyFlags,
    },

    /// Reload the sprite's skin.
    UpdateSkin(Costume),

    /// Forget the sprite.
    Remove,

    /// Replace the stage backdrop.
    SetStage(Backdrop),

    /// Start a sound.
    PlaySound(SoundRequest),
}

impl RenderCommand {
    /// Deliver the command on behalf of actor `id`.
    pub fn dispatch(&self, id: ActorId, render: &dyn RenderLoop) {
        match self {
            Self::Draw { props, changed } => render.draw_sprite(id, props, *changed),
            Self::UpdateSkin(costume) => render.update_skin(id, costume),
            Self::Remove => render.remove_sprite(id),
            Self::SetStage(backdrop) => render.set_stage(backdrop),
            Self::PlaySound(sound) => render.play_sound(sound),
        }
    }
}

/// Deliver a batch of commands in order.
pub fn dispatch_all(commands: &[RenderCommand], id: ActorId, render: &dyn RenderLoop) {
    for command in commands {
        command.dispatch(id, render);
    }
}
