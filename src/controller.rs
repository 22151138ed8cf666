//! Pointer-driven editing state machine.
//!
//! The controller knows nothing about the GUI toolkit. The shell translates its
//! native input into [`PointerEvent`]s in canvas coordinates, hands them to
//! [`InteractionController::handle`] together with the scene, and repaints when the
//! returned [`Feedback`] asks for it.

use crate::constants;
use crate::geometry::{Offset, Point};
use crate::types::{ConnectOutcome, NodeIndex, Scene};
use serde::{Deserialize, Serialize};

/// Active editing behavior, chosen with the toolbar mode buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// No mode selected yet; pointer presses are ignored
    #[default]
    None,
    /// Clicking the canvas places a new polygon
    Create,
    /// Clicking a polygon removes it
    Delete,
    /// Dragging a polygon moves it
    Move,
    /// Clicking two polygons connects them
    Connect,
}

impl Mode {
    /// The modes offered on the toolbar, in display order.
    pub const SELECTABLE: [Mode; 4] = [Mode::Create, Mode::Delete, Mode::Move, Mode::Connect];

    /// Toolbar button label.
    pub fn label(self) -> &'static str {
        match self {
            Mode::None => "No Mode",
            Mode::Create => "Create Mode",
            Mode::Delete => "Delete Mode",
            Mode::Move => "Move Mode",
            Mode::Connect => "Connect Mode",
        }
    }

    /// Instructions shown when the mode becomes active.
    pub fn prompt(self) -> &'static str {
        match self {
            Mode::None => "Select a mode to start editing",
            Mode::Create => "You are in Create Mode -> Left-click on the canvas to create a polygon",
            Mode::Delete => "You are in Delete Mode -> Left-click on a polygon to delete it",
            Mode::Move => {
                "You are in Move Mode -> Left-click on a polygon and drag it to new location"
            }
            Mode::Connect => "You are in Connect Mode -> Click two polygons to connect them",
        }
    }
}

/// Mouse button carried by press and release events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button (or the platform's primary button)
    Primary,
    /// Right button
    Secondary,
    /// Middle button / wheel click
    Middle,
}

/// Toolkit-neutral pointer input, in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// A button went down
    Pressed {
        /// Pointer position
        pos: Point,
        /// Which button
        button: PointerButton,
    },
    /// The pointer moved
    Moved {
        /// New pointer position
        pos: Point,
    },
    /// A button came back up
    Released {
        /// Pointer position
        pos: Point,
        /// Which button
        button: PointerButton,
    },
}

/// What the shell should do after an event has been handled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    /// The scene changed and the canvas must be redrawn
    pub repaint: bool,
    /// A message for the status bar
    pub status: Option<String>,
}

impl Feedback {
    fn changed() -> Self {
        Self {
            repaint: true,
            status: None,
        }
    }

    fn message(text: impl Into<String>) -> Self {
        Self {
            repaint: false,
            status: Some(text.into()),
        }
    }
}

/// A polygon being dragged in move mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    /// Node being moved
    pub node: NodeIndex,
    /// Pointer position minus node center at the moment of the press
    pub grab_offset: Offset,
}

/// Editing session: the mode plus everything a mode remembers between events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionController {
    /// Active mode
    #[serde(skip)]
    mode: Mode,
    /// Polygon held by the pointer in move mode
    #[serde(skip)]
    drag: Option<DragState>,
    /// First polygon picked in connect mode
    #[serde(skip)]
    connection_start: Option<NodeIndex>,
    /// Radius of newly created polygons
    #[serde(skip)]
    default_radius: u32,
    /// Side count of newly created polygons
    #[serde(deserialize_with = "deserialize_sides")]
    default_sides: u32,
}

/// Restored side counts go through the same clamp as the selector.
fn deserialize_sides<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let sides = u32::deserialize(deserializer)?;
    Ok(sides.clamp(constants::MIN_SIDES, constants::MAX_SIDES))
}

impl Default for InteractionController {
    fn default() -> Self {
        Self {
            mode: Mode::None,
            drag: None,
            connection_start: None,
            default_radius: constants::DEFAULT_RADIUS,
            default_sides: constants::DEFAULT_SIDES,
        }
    }
}

impl InteractionController {
    /// Creates a controller with no active mode and default polygon settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Polygon currently held in move mode, if any.
    pub fn drag(&self) -> Option<DragState> {
        self.drag
    }

    /// First polygon picked in connect mode, if any.
    pub fn connection_start(&self) -> Option<NodeIndex> {
        self.connection_start
    }

    /// Radius given to new polygons.
    pub fn default_radius(&self) -> u32 {
        self.default_radius
    }

    /// Side count given to new polygons.
    pub fn default_sides(&self) -> u32 {
        self.default_sides
    }

    /// Switches mode, dropping any half-finished drag or connection.
    pub fn set_mode(&mut self, mode: Mode) -> Feedback {
        self.mode = mode;
        self.drag = None;
        self.connection_start = None;
        log::info!("{}", mode.prompt());
        Feedback::message(mode.prompt())
    }

    /// Changes the side count for polygons created from now on, clamped to the
    /// selector's range. Existing polygons keep theirs.
    pub fn set_default_sides(&mut self, sides: u32) {
        self.default_sides = sides.clamp(constants::MIN_SIDES, constants::MAX_SIDES);
    }

    /// Forgets any state that refers to node indices. Called when the scene is
    /// replaced wholesale.
    pub fn reset_transient(&mut self) {
        self.drag = None;
        self.connection_start = None;
    }

    /// Applies one pointer event to the scene according to the active mode.
    pub fn handle(&mut self, scene: &mut Scene, event: PointerEvent) -> Feedback {
        match event {
            PointerEvent::Pressed {
                pos,
                button: PointerButton::Primary,
            } => self.on_press(scene, pos),
            PointerEvent::Pressed { .. } => Feedback::default(),
            PointerEvent::Moved { pos } => self.on_move(scene, pos),
            PointerEvent::Released { .. } => self.on_release(scene),
        }
    }

    fn on_press(&mut self, scene: &mut Scene, pos: Point) -> Feedback {
        match self.mode {
            Mode::None => Feedback::default(),
            Mode::Create => {
                scene.add_node(pos, self.default_radius, self.default_sides);
                log::info!("After creation: nodes {}", scene.describe_nodes());
                Feedback::changed()
            }
            Mode::Delete => {
                let Some(index) = scene.hit_test(pos) else {
                    return Feedback::default();
                };
                scene.remove_node(index);
                log::info!(
                    "After deletion: nodes {} connections {}",
                    scene.describe_nodes(),
                    scene.describe_connections()
                );
                Feedback::changed()
            }
            Mode::Move => {
                if let Some(index) = scene.hit_test(pos) {
                    self.drag = Some(DragState {
                        node: index,
                        grab_offset: pos - scene.nodes[index].center,
                    });
                }
                Feedback::default()
            }
            Mode::Connect => {
                let Some(index) = scene.hit_test(pos) else {
                    return Feedback::default();
                };
                self.on_connect_hit(scene, index)
            }
        }
    }

    fn on_connect_hit(&mut self, scene: &mut Scene, index: NodeIndex) -> Feedback {
        let Some(start) = self.connection_start.take() else {
            self.connection_start = Some(index);
            log::info!("First polygon selected. Click another to connect.");
            return Feedback::message("First polygon selected. Click another to connect.");
        };

        match scene.add_connection(start, index) {
            ConnectOutcome::Added => {
                log::info!("After connecting: connections {}", scene.describe_connections());
                Feedback::changed()
            }
            ConnectOutcome::AlreadyConnected => {
                Feedback::message("Those polygons are already connected")
            }
            ConnectOutcome::SelfLoop => Feedback::message("Connection cancelled"),
            ConnectOutcome::OutOfRange => {
                log::warn!("Connection start {start} no longer exists");
                Feedback::default()
            }
        }
    }

    fn on_move(&mut self, scene: &mut Scene, pos: Point) -> Feedback {
        if self.mode != Mode::Move {
            return Feedback::default();
        }
        let Some(drag) = self.drag else {
            return Feedback::default();
        };
        if scene.move_node(drag.node, pos - drag.grab_offset) {
            Feedback::changed()
        } else {
            Feedback::default()
        }
    }

    fn on_release(&mut self, scene: &Scene) -> Feedback {
        if self.mode != Mode::Move {
            return Feedback::default();
        }
        if self.drag.take().is_some() {
            log::info!("After moving: nodes {}", scene.describe_nodes());
        }
        Feedback::default()
    }
}
