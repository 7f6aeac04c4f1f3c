//! Renderer contract
//!
//! Abstracts the visual output so the controller never touches a terminal,
//! canvas or widget directly.

use sortvis_core::Step;
use std::io::Write;
use tracing::warn;

/// Visual output for playback
///
/// Invoked exclusively by `PlaybackController`, once per rendered step and
/// once when the run completes.
pub trait Renderer: Send {
    /// Draw one snapshot
    ///
    /// Implementations scale bar heights relative to `step.max_value()`, clear
    /// highlights from the previous step, mark highlighted indices and the
    /// pivot distinctly, and show the auxiliary panel only when
    /// `step.auxiliary` is present.
    fn render_step(&mut self, step: &Step);

    /// Mark every element as sorted
    fn render_final(&mut self);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render_step(&mut self, step: &Step) {
        (**self).render_step(step);
    }

    fn render_final(&mut self) {
        (**self).render_final();
    }
}

const NORMAL: char = '#';
const HIGHLIGHTED: char = '?';
const PIVOT: char = 'P';
const SORTED: char = '=';

/// Default chart height in rows
pub const DEFAULT_ROWS: usize = 12;

/// Terminal bar chart renderer
///
/// One column per value, `rows` rows high. Highlighted columns are drawn
/// with `?`, the pivot with `P`, and sorted columns with `=`. Write errors
/// are logged and swallowed.
pub struct TextRenderer<W: Write> {
    out: W,
    rows: usize,
    clear_screen: bool,
    last: Option<Step>,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            rows: DEFAULT_ROWS,
            clear_screen: false,
            last: None,
        }
    }

    /// Chart height (at least 1)
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows.max(1);
        self
    }

    /// Emit an ANSI clear before every frame
    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, step: &Step, sorted: bool) {
        let frame = render_frame(step, self.rows, sorted);
        let prefix = if self.clear_screen { "\x1b[2J\x1b[H" } else { "" };
        let result = write!(self.out, "{}{}", prefix, frame).and_then(|()| self.out.flush());

        if let Err(e) = result {
            warn!(error = %e, "Failed to write frame");
        }
    }
}

impl<W: Write + Send> Renderer for TextRenderer<W> {
    fn render_step(&mut self, step: &Step) {
        self.draw(step, false);
        self.last = Some(step.clone());
    }

    fn render_final(&mut self) {
        match self.last.take() {
            Some(step) => self.draw(&step, true),
            None => warn!("render_final called before any step"),
        }
    }
}

/// Height in rows of a bar, at least one row for any positive value
fn bar_height(value: u32, max: u32, rows: usize) -> usize {
    if max == 0 || value == 0 {
        return 0;
    }
    let scaled = (u64::from(value) * rows as u64).div_ceil(u64::from(max));
    usize::try_from(scaled).unwrap_or(rows).clamp(1, rows)
}

fn column_glyph(step: &Step, index: usize, sorted: bool) -> char {
    if sorted {
        SORTED
    } else if step.pivot_index == Some(index) {
        PIVOT
    } else if step.is_highlighted(index) {
        HIGHLIGHTED
    } else {
        NORMAL
    }
}

fn render_bars(out: &mut String, values: &[u32], rows: usize, glyph: impl Fn(usize) -> char) {
    let max = values.iter().copied().max().unwrap_or(0);
    let heights: Vec<usize> = values.iter().map(|&v| bar_height(v, max, rows)).collect();

    for row in (1..=rows).rev() {
        let line: String = heights
            .iter()
            .enumerate()
            .map(|(i, &h)| if h >= row { glyph(i) } else { ' ' })
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
}

/// Render one frame as text
fn render_frame(step: &Step, rows: usize, sorted: bool) -> String {
    let mut out = String::new();
    render_bars(&mut out, &step.values, rows, |i| column_glyph(step, i, sorted));
    out.push_str(&"-".repeat(step.len()));
    out.push('\n');
    out.push_str(&format!(
        "comparisons: {}  swaps: {}\n",
        step.comparisons, step.swaps
    ));

    if let Some(aux) = step.auxiliary.as_ref().filter(|_| !sorted) {
        out.push_str("auxiliary:\n");
        render_bars(&mut out, aux, (rows / 2).max(1), |_| NORMAL);
        out.push_str(&"-".repeat(aux.len()));
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(renderer: TextRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn bars_scale_to_max_value() {
        assert_eq!(bar_height(10, 10, 4), 4);
        assert_eq!(bar_height(5, 10, 4), 2);
        assert_eq!(bar_height(1, 100, 4), 1);
    }

    #[test]
    fn marks_highlights_and_pivot() {
        let mut renderer = TextRenderer::new(Vec::new()).with_rows(2);
        let step = Step::new(vec![2, 2, 2], 1, 0)
            .with_highlights([0])
            .with_pivot(2);

        renderer.render_step(&step);
        let text = output(renderer);

        assert!(text.starts_with("?#P\n?#P\n---\n"));
        assert!(text.contains("comparisons: 1  swaps: 0"));
        assert!(!text.contains("auxiliary"));
    }

    #[test]
    fn highlights_do_not_carry_over() {
        let mut renderer = TextRenderer::new(Vec::new()).with_rows(1);
        renderer.render_step(&Step::new(vec![1, 1], 1, 0).with_highlights([0, 1]));
        renderer.render_step(&Step::new(vec![1, 1], 1, 0));

        let text = output(renderer);
        let frames: Vec<&str> = text.split("comparisons").collect();
        assert!(frames[1].contains("##"));
        assert!(!frames[1].contains('?'));
    }

    #[test]
    fn auxiliary_panel_only_when_present() {
        let mut renderer = TextRenderer::new(Vec::new()).with_rows(2);
        renderer.render_step(&Step::new(vec![3, 1], 0, 0).with_auxiliary(vec![1, 3]));

        let text = output(renderer);
        assert!(text.contains("auxiliary:\n"));
    }

    #[test]
    fn final_frame_marks_everything_sorted() {
        let mut renderer = TextRenderer::new(Vec::new()).with_rows(1);
        renderer.render_step(&Step::new(vec![1, 2, 3], 3, 0).with_highlights([1]));
        renderer.render_final();

        let text = output(renderer);
        assert!(text.ends_with("===\n---\ncomparisons: 3  swaps: 0\n"));
    }

    #[test]
    fn boxed_renderer_delegates() {
        let mut renderer: Box<dyn Renderer> = Box::new(TextRenderer::new(Vec::new()));
        renderer.render_step(&Step::new(vec![1], 0, 0));
        renderer.render_final();
    }
}
