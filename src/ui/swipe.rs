use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Program};
use iced::{Point, Rectangle, Renderer, Theme};

use crate::Message;

/// Transparent surface laid over the lightbox image that turns a
/// horizontal drag into a swipe
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeSurface;

impl Program<Message> for SwipeSurface {
    type State = DragState;

    fn draw(
        &self,
        _state: &Self::State,
        _renderer: &Renderer,
        _theme: &Theme,
        _bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        // Nothing to paint, the image underneath shows through
        vec![]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        match event {
            // Mouse button press - start dragging
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(pos) = cursor.position_over(bounds) {
                    state.origin = Some(pos);
                    state.last_position = Some(pos);
                    return (canvas::event::Status::Captured, None);
                }
            }

            // Mouse move - remember where the drag is, the cursor may leave
            // the window before release
            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if state.origin.is_some() {
                    state.last_position = Some(position);
                }
            }

            // Mouse button release - report the horizontal offset
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if let Some(origin) = state.origin.take() {
                    let end = cursor.position().or(state.last_position).unwrap_or(origin);
                    state.last_position = None;
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::Swiped(end.x - origin.x)),
                    );
                }
            }

            _ => {}
        }

        (canvas::event::Status::Ignored, None)
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if state.origin.is_some() {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::Idle
        }
    }
}

/// State for drag interactions
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Where the drag started, `None` when not dragging
    pub origin: Option<Point>,
    pub last_position: Option<Point>,
}
