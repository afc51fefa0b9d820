//! A surface that records draw calls instead of rasterizing them.

use folio_core::{Rgba, Viewport};

use super::{Paint, Shadow, StateStack, Surface, Transform};

/// One recorded draw call, with the state that was in effect.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillCircle {
        cx: f32,
        cy: f32,
        radius: f32,
        paint: Paint,
        shadow: Shadow,
        transform: Transform,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        paint: Paint,
        shadow: Shadow,
        transform: Transform,
    },
    StrokeLine {
        from: (f32, f32),
        to: (f32, f32),
        color: Rgba,
        line_width: f32,
        shadow: Shadow,
        transform: Transform,
    },
}

/// Records every draw call in order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    viewport: Viewport,
    state: StateStack,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded line strokes as `(from, to, color)`.
    pub fn lines(&self) -> impl Iterator<Item = ((f32, f32), (f32, f32), Rgba)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::StrokeLine {
                from, to, color, ..
            } => Some((*from, *to, *color)),
            _ => None,
        })
    }

    /// Number of unbalanced `save` calls.
    pub fn save_depth(&self) -> usize {
        self.state.depth()
    }

    /// Transform currently in effect.
    pub fn transform(&self) -> Transform {
        self.state.current().transform
    }
}

impl Surface for DrawList {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.state.reset();
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn set_fill(&mut self, paint: Paint) {
        self.state.current_mut().fill = paint;
    }

    fn set_stroke(&mut self, color: Rgba, line_width: f32) {
        let state = self.state.current_mut();
        state.stroke = color;
        state.line_width = line_width;
    }

    fn set_shadow(&mut self, blur: f32, color: Rgba) {
        self.state.current_mut().shadow = Shadow { blur, color };
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        let state = self.state.current();
        self.commands.push(DrawCommand::FillCircle {
            cx,
            cy,
            radius,
            paint: state.fill.clone(),
            shadow: state.shadow,
            transform: state.transform,
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let state = self.state.current();
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            paint: state.fill.clone(),
            shadow: state.shadow,
            transform: state.transform,
        });
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        let state = self.state.current();
        self.commands.push(DrawCommand::StrokeLine {
            from: (x0, y0),
            to: (x1, y1),
            color: state.stroke,
            line_width: state.line_width,
            shadow: state.shadow,
            transform: state.transform,
        });
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.translate(dx, dy);
    }

    fn rotate(&mut self, radians: f32) {
        self.state.rotate(radians);
    }
}

#[cfg(test)]
mod tests {
    use folio_core::Rgb;

    use super::*;

    #[test]
    fn test_records_state_with_each_call() {
        let mut list = DrawList::new(Viewport::new(100.0, 100.0));
        let blue = Rgb::new(0, 0, 255).with_alpha(0.5);

        list.clear();
        list.set_shadow(10.0, blue);
        list.set_fill(Paint::Solid(blue));
        list.fill_circle(1.0, 2.0, 3.0);
        list.set_stroke(blue, 1.0);
        list.stroke_line(0.0, 0.0, 5.0, 5.0);

        let cmds = list.commands();
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[0], DrawCommand::Clear);
        match &cmds[1] {
            DrawCommand::FillCircle { paint, shadow, .. } => {
                assert_eq!(*paint, Paint::Solid(blue));
                assert_eq!(shadow.blur, 10.0);
            }
            other => panic!("expected circle, got {other:?}"),
        }
        // Shadow set for the circle still applies to the line.
        match &cmds[2] {
            DrawCommand::StrokeLine { shadow, .. } => assert!(shadow.is_visible()),
            other => panic!("expected line, got {other:?}"),
        }
        assert_eq!(list.lines().count(), 1);
    }
}
