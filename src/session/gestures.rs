use crate::foundation::core::{Point, Size};
use crate::foundation::error::{CarouselError, CarouselResult};
use crate::style::config::{MIN_BOX_HEIGHT, MIN_BOX_WIDTH, TextBox};

/// Where a pointer gesture stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging,
    Dropped,
    Cancelled,
}

/// Handle grabbed on the caption box overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragMode {
    Move,
    Nw,
    Ne,
    Sw,
    Se,
}

impl DragMode {
    /// Box after moving the pointer by `(dx, dy)` canvas fractions from `origin`.
    fn apply(self, origin: TextBox, dx: f64, dy: f64) -> TextBox {
        let TextBox {
            mut x,
            mut y,
            mut width,
            mut height,
        } = origin;
        match self {
            DragMode::Move => {
                x += dx;
                y += dy;
            }
            DragMode::Nw => {
                x += dx;
                y += dy;
                width -= dx;
                height -= dy;
            }
            DragMode::Ne => {
                y += dy;
                width += dx;
                height -= dy;
            }
            DragMode::Sw => {
                x += dx;
                width -= dx;
                height += dy;
            }
            DragMode::Se => {
                width += dx;
                height += dy;
            }
        }
        TextBox {
            x,
            y,
            width,
            height,
        }
    }
}

/// Keep a dragged box on the canvas at no less than the minimum size.
pub fn clamp_drag_box(bx: TextBox) -> TextBox {
    let mut x = bx.x.max(0.0);
    let mut y = bx.y.max(0.0);
    let mut width = bx.width.max(MIN_BOX_WIDTH);
    let mut height = bx.height.max(MIN_BOX_HEIGHT);
    if x + width > 1.0 {
        width = 1.0 - x;
    }
    if y + height > 1.0 {
        height = 1.0 - y;
    }
    if width < MIN_BOX_WIDTH {
        width = MIN_BOX_WIDTH;
        x = 1.0 - MIN_BOX_WIDTH;
    }
    if height < MIN_BOX_HEIGHT {
        height = MIN_BOX_HEIGHT;
        y = 1.0 - MIN_BOX_HEIGHT;
    }
    TextBox {
        x,
        y,
        width,
        height,
    }
}

#[derive(Clone, Copy, Debug)]
struct BoxDrag {
    mode: DragMode,
    start: Point,
    view: Size,
    origin: TextBox,
    current: TextBox,
}

/// Move/resize gesture on the caption box, in on-screen pixels.
#[derive(Clone, Debug, Default)]
pub struct BoxGesture {
    phase: GesturePhase,
    drag: Option<BoxDrag>,
}

impl BoxGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Pointer went down on a handle. `view` is the on-screen size of the canvas preview.
    pub fn begin(
        &mut self,
        mode: DragMode,
        pointer: Point,
        view: Size,
        origin: TextBox,
    ) -> CarouselResult<()> {
        if !(view.width > 0.0 && view.height > 0.0) {
            return Err(CarouselError::validation(
                "preview size must be positive to drag the caption box",
            ));
        }
        self.drag = Some(BoxDrag {
            mode,
            start: pointer,
            view,
            origin,
            current: origin,
        });
        self.phase = GesturePhase::Dragging;
        Ok(())
    }

    /// Pointer moved; returns the box to show, or `None` when not dragging.
    pub fn update(&mut self, pointer: Point) -> Option<TextBox> {
        let drag = self.drag.as_mut()?;
        let dx = (pointer.x - drag.start.x) / drag.view.width;
        let dy = (pointer.y - drag.start.y) / drag.view.height;
        drag.current = clamp_drag_box(drag.mode.apply(drag.origin, dx, dy));
        Some(drag.current)
    }

    /// Pointer released; returns the final box.
    pub fn drop_at(&mut self, pointer: Point) -> Option<TextBox> {
        let result = self.update(pointer)?;
        self.drag = None;
        self.phase = GesturePhase::Dropped;
        Some(result)
    }

    pub fn cancel(&mut self) -> Option<TextBox> {
        let drag = self.drag.take()?;
        self.phase = GesturePhase::Cancelled;
        Some(drag.origin)
    }
}

/// Drag-to-reorder gesture over the slide gallery, in slide indices.
#[derive(Clone, Debug, Default)]
pub struct ReorderGesture {
    phase: GesturePhase,
    dragged: Option<usize>,
    over: Option<usize>,
}

impl ReorderGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn dragged(&self) -> Option<usize> {
        self.dragged
    }

    pub fn drop_target(&self) -> Option<usize> {
        self.over
    }

    /// Drag started on the slide at `index`.
    pub fn begin(&mut self, index: usize) {
        self.dragged = Some(index);
        self.over = None;
        self.phase = GesturePhase::Dragging;
    }

    pub fn hover(&mut self, index: usize) {
        if let Some(from) = self.dragged {
            self.over = (from != index).then_some(index);
        }
    }

    pub fn leave(&mut self) {
        self.over = None;
    }

    /// Dropped on `index`; returns the `(from, to)` move to apply, if any.
    pub fn drop_on(&mut self, index: usize) -> Option<(usize, usize)> {
        let from = self.dragged.take()?;
        self.over = None;
        self.phase = GesturePhase::Dropped;
        (from != index).then_some((from, index))
    }

    pub fn cancel(&mut self) {
        if self.dragged.take().is_some() {
            self.phase = GesturePhase::Cancelled;
        }
        self.over = None;
    }
}

/// Move the element at `from` so it lands at `to`, shifting the ones in between.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> CarouselResult<()> {
    let len = items.len();
    if from >= len || to >= len {
        return Err(CarouselError::validation(format!(
            "cannot move slide {from} to {to} among {len}"
        )));
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/session/gestures.rs"]
mod tests;
