//! Desktop command bus: how hosted app content asks for windows.
//!
//! App panels never hold a reference to the session. They publish commands
//! onto a shared single-threaded queue; the session owner drains it and feeds
//! the reducer. These two commands are the window manager's entire
//! integration surface.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::model::{InteractionState, WindowId};
use crate::reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
use crate::session::DesktopSession;

/// Reserved id for the hidden console window unlocked by app content.
pub const SECRET_WINDOW_ID: &str = "secret";

/// Commands any collaborator may publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopCommand {
    /// Open the window with the given id if it is not already open.
    OpenWindow {
        /// Window to open.
        window_id: WindowId,
    },
    /// Open the secret console window if it is not already open.
    OpenSecretWindow,
}

/// Cloneable handle on the shared command queue.
///
/// Single-threaded by construction; publishing from input handlers and
/// draining from the session owner happen on the same UI thread.
#[derive(Debug, Clone, Default)]
pub struct CommandBus {
    queue: Rc<RefCell<VecDeque<DesktopCommand>>>,
}

impl CommandBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a command for the session owner's next drain.
    pub fn publish(&self, command: DesktopCommand) {
        self.queue.borrow_mut().push_back(command);
    }

    /// Removes and returns every queued command in publish order.
    pub fn drain(&self) -> Vec<DesktopCommand> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

/// Drains `bus` and applies each command, collecting reducer effects.
///
/// Both commands open-if-closed: a command naming an already open window is
/// ignored. `OpenWindow` routes through the toggle path (and so also closes
/// the start menu); the secret window opens directly.
pub fn apply_commands(
    session: &mut DesktopSession,
    interaction: &mut InteractionState,
    bus: &CommandBus,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    for command in bus.drain() {
        match command {
            DesktopCommand::OpenWindow { window_id } => {
                if !session.store.is_open(&window_id) {
                    effects.extend(reduce_desktop(
                        session,
                        interaction,
                        DesktopAction::ToggleWindow { window_id },
                    ));
                }
            }
            DesktopCommand::OpenSecretWindow => {
                let window_id = WindowId::from(SECRET_WINDOW_ID);
                if !session.store.is_open(&window_id) {
                    crate::reducer::open_window(session, &window_id);
                    effects.push(RuntimeEffect::SyncSessionUrl);
                }
            }
        }
    }
    effects
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowDefaults;

    fn session() -> DesktopSession {
        DesktopSession::with_rng_seed(WindowDefaults::new(), 11)
    }

    #[test]
    fn commands_drain_in_publish_order() {
        let bus = CommandBus::new();
        bus.publish(DesktopCommand::OpenWindow {
            window_id: "about".into(),
        });
        bus.publish(DesktopCommand::OpenSecretWindow);

        assert_eq!(
            bus.drain(),
            vec![
                DesktopCommand::OpenWindow {
                    window_id: "about".into()
                },
                DesktopCommand::OpenSecretWindow,
            ]
        );
        assert!(bus.is_empty());
    }

    #[test]
    fn open_commands_are_ignored_for_already_open_windows() {
        let mut session = session();
        let mut interaction = InteractionState::default();
        let bus = CommandBus::new();

        bus.publish(DesktopCommand::OpenWindow {
            window_id: "about".into(),
        });
        apply_commands(&mut session, &mut interaction, &bus);
        let stack_before = session.store.get(&"about".into()).unwrap().stack_order;

        // A second request must not toggle the window closed.
        bus.publish(DesktopCommand::OpenWindow {
            window_id: "about".into(),
        });
        let effects = apply_commands(&mut session, &mut interaction, &bus);

        assert!(effects.is_empty());
        assert!(session.store.is_open(&"about".into()));
        assert_eq!(
            session.store.get(&"about".into()).unwrap().stack_order,
            stack_before
        );
    }

    #[test]
    fn the_secret_window_opens_once_and_becomes_active() {
        let mut session = session();
        let mut interaction = InteractionState::default();
        let bus = CommandBus::new();

        bus.publish(DesktopCommand::OpenSecretWindow);
        bus.publish(DesktopCommand::OpenSecretWindow);
        let effects = apply_commands(&mut session, &mut interaction, &bus);

        assert_eq!(effects, vec![RuntimeEffect::SyncSessionUrl]);
        assert!(session.store.is_open(&SECRET_WINDOW_ID.into()));
        assert_eq!(
            session.store.active_window(),
            Some(&SECRET_WINDOW_ID.into())
        );
    }
}
