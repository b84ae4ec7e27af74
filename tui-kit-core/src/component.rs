//! Component trait shared by every widget in the kit

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from props and answers events with actions
///
/// Rules every kit component follows:
/// 1. Props carry all data owned by the application (values, focus, callbacks)
/// 2. `handle_event` returns actions and never reaches into application state
/// 3. Purely visual state (cursor, open panel, last rendered area for
///    hit-testing) lives in `&mut self`
///
/// Hit-testing relies on the area recorded by the previous `render`, so a
/// component that was never rendered ignores mouse events.
///
/// # Example
///
/// ```ignore
/// use tui_kit::{Component, EventKind, Frame, Rect};
///
/// struct Checkbox {
///     area: Rect,
/// }
///
/// struct CheckboxProps {
///     checked: bool,
///     is_focused: bool,
///     on_toggle: fn(bool) -> AppAction,
/// }
///
/// impl Component<AppAction> for Checkbox {
///     type Props<'a> = CheckboxProps;
///
///     fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> impl IntoIterator<Item = AppAction> {
///         let toggled = match event {
///             EventKind::Key(key) => props.is_focused && key.code == KeyCode::Char(' '),
///             EventKind::PointerDown { column, row } => contains(self.area, *column, *row),
///             _ => false,
///         };
///         toggled.then(|| (props.on_toggle)(!props.checked))
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         self.area = area;
///         let mark = if props.checked { "[x]" } else { "[ ]" };
///         frame.render_widget(Paragraph::new(mark), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Returns `None`, `Some(action)` or any collection of actions.
    /// Render-only components keep the default.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
