use std::io::{self, Write};

pub trait BoxDrawing: Copy + Clone {
    const TOP_LEFT: &'static str;
    const TOP_RIGHT: &'static str;
    const BOTTOM_LEFT: &'static str;
    const BOTTOM_RIGHT: &'static str;
    const HORIZONTAL: &'static str;
    const VERTICAL: &'static str;
    const T_RIGHT: &'static str;
    const T_LEFT: &'static str;

    #[inline]
    fn top_border(width: usize) -> String {
        let inner_width = width.saturating_sub(2);
        format!(
            "{}{}{}",
            Self::TOP_LEFT,
            Self::HORIZONTAL.repeat(inner_width),
            Self::TOP_RIGHT
        )
    }

    /// Top border with a title set into it: `╔═ Title ═══╗`.
    fn titled_border(width: usize, title: &str) -> String {
        let inner_width = width.saturating_sub(2);
        let label = format!("{} {} ", Self::HORIZONTAL, title);
        let label_width = display_width(&label);

        if label_width >= inner_width {
            return Self::top_border(width);
        }

        format!(
            "{}{}{}{}",
            Self::TOP_LEFT,
            label,
            Self::HORIZONTAL.repeat(inner_width - label_width),
            Self::TOP_RIGHT
        )
    }

    #[inline]
    fn bottom_border(width: usize) -> String {
        let inner_width = width.saturating_sub(2);
        format!(
            "{}{}{}",
            Self::BOTTOM_LEFT,
            Self::HORIZONTAL.repeat(inner_width),
            Self::BOTTOM_RIGHT
        )
    }

    #[inline]
    fn divider(width: usize) -> String {
        let inner_width = width.saturating_sub(2);
        format!(
            "{}{}{}",
            Self::T_RIGHT,
            Self::HORIZONTAL.repeat(inner_width),
            Self::T_LEFT
        )
    }
}

#[derive(Debug, Copy, Clone)]
pub struct DoubleBox;

impl BoxDrawing for DoubleBox {
    const TOP_LEFT: &'static str = "╔";
    const TOP_RIGHT: &'static str = "╗";
    const BOTTOM_LEFT: &'static str = "╚";
    const BOTTOM_RIGHT: &'static str = "╝";
    const HORIZONTAL: &'static str = "═";
    const VERTICAL: &'static str = "║";
    const T_RIGHT: &'static str = "╠";
    const T_LEFT: &'static str = "╣";
}

#[derive(Debug, Copy, Clone)]
pub struct SingleBox;

impl BoxDrawing for SingleBox {
    const TOP_LEFT: &'static str = "┌";
    const TOP_RIGHT: &'static str = "┐";
    const BOTTOM_LEFT: &'static str = "└";
    const BOTTOM_RIGHT: &'static str = "┘";
    const HORIZONTAL: &'static str = "─";
    const VERTICAL: &'static str = "│";
    const T_RIGHT: &'static str = "├";
    const T_LEFT: &'static str = "┤";
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[inline]
fn display_width(s: &str) -> usize {
    s.chars().count()
}

/// Pads to exactly `width` columns, cutting overlong text.
fn pad_text(text: &str, width: usize, align: Align) -> String {
    let text_width = display_width(text);

    if text_width >= width {
        return text.chars().take(width).collect();
    }

    let padding = width - text_width;
    let mut result = String::with_capacity(width);

    match align {
        Align::Left => {
            result.push_str(text);
            result.push_str(&" ".repeat(padding));
        }
        Align::Right => {
            result.push_str(&" ".repeat(padding));
            result.push_str(text);
        }
        Align::Center => {
            let left_pad = padding / 2;
            let right_pad = padding - left_pad;
            result.push_str(&" ".repeat(left_pad));
            result.push_str(text);
            result.push_str(&" ".repeat(right_pad));
        }
    }

    result
}

pub struct LayoutEngine<B: BoxDrawing> {
    width: usize,
    _box_style: std::marker::PhantomData<B>,
}

impl<B: BoxDrawing> LayoutEngine<B> {
    #[inline]
    pub const fn new(width: usize) -> Self {
        let width = if width < 10 { 10 } else { width };
        Self {
            width,
            _box_style: std::marker::PhantomData,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn render_header<W: Write>(
        &self,
        writer: &mut W,
        title: &str,
        align: Align,
    ) -> io::Result<()> {
        writeln!(writer, "{}", B::top_border(self.width))?;
        self.render_line(writer, title, align)?;
        writeln!(writer, "{}", B::bottom_border(self.width))?;
        Ok(())
    }

    pub fn render_line<W: Write>(
        &self,
        writer: &mut W,
        content: &str,
        align: Align,
    ) -> io::Result<()> {
        let inner_width = self.width.saturating_sub(2);
        let padded = pad_text(content, inner_width, align);
        writeln!(writer, "{}{}{}", B::VERTICAL, padded, B::VERTICAL)?;
        Ok(())
    }

    /// `label` left, `value` right-aligned, inside one boxed line.
    pub fn render_field<W: Write>(&self, writer: &mut W, label: &str, value: &str) -> io::Result<()> {
        let inner_width = self.width.saturating_sub(4);
        let label = format!("{}:", label);
        let value_width = inner_width.saturating_sub(display_width(&label));
        let content = format!(" {}{} ", label, pad_text(value, value_width, Align::Right));
        writeln!(writer, "{}{}{}", B::VERTICAL, content, B::VERTICAL)?;
        Ok(())
    }

    pub fn render_divider<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", B::divider(self.width))?;
        Ok(())
    }

    pub fn render_box_top<W: Write>(&self, writer: &mut W, title: &str) -> io::Result<()> {
        writeln!(writer, "{}", B::titled_border(self.width, title))?;
        Ok(())
    }

    pub fn render_box_bottom<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", B::bottom_border(self.width))?;
        Ok(())
    }

    pub fn render_plain<W: Write>(&self, writer: &mut W, content: &str) -> io::Result<()> {
        writeln!(writer, "{}", content)?;
        Ok(())
    }

    pub fn render_blank<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer)?;
        Ok(())
    }
}

/// Accumulates a whole screen so it reaches the terminal in one write.
pub struct MenuBuilder<B: BoxDrawing> {
    engine: LayoutEngine<B>,
    buffer: Vec<u8>,
}

impl<B: BoxDrawing> MenuBuilder<B> {
    pub fn new(width: usize) -> Self {
        Self {
            engine: LayoutEngine::new(width),
            buffer: Vec::with_capacity(2048),
        }
    }

    pub fn header(mut self, title: &str, align: Align) -> io::Result<Self> {
        self.engine.render_header(&mut self.buffer, title, align)?;
        Ok(self)
    }

    pub fn box_start(mut self, title: &str) -> io::Result<Self> {
        self.engine.render_box_top(&mut self.buffer, title)?;
        Ok(self)
    }

    pub fn box_end(mut self) -> io::Result<Self> {
        self.engine.render_box_bottom(&mut self.buffer)?;
        Ok(self)
    }

    pub fn line(mut self, content: &str, align: Align) -> io::Result<Self> {
        self.engine.render_line(&mut self.buffer, content, align)?;
        Ok(self)
    }

    pub fn field(mut self, label: &str, value: &str) -> io::Result<Self> {
        self.engine.render_field(&mut self.buffer, label, value)?;
        Ok(self)
    }

    pub fn divider(mut self) -> io::Result<Self> {
        self.engine.render_divider(&mut self.buffer)?;
        Ok(self)
    }

    pub fn plain(mut self, content: &str) -> io::Result<Self> {
        self.engine.render_plain(&mut self.buffer, content)?;
        Ok(self)
    }

    pub fn blank(mut self) -> io::Result<Self> {
        self.engine.render_blank(&mut self.buffer)?;
        Ok(self)
    }

    pub fn into_string(self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }

    pub fn finish<W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.buffer)?;
        writer.flush()?;
        Ok(())
    }
}

pub type DoubleMenu = MenuBuilder<DoubleBox>;
pub type SingleMenu = MenuBuilder<SingleBox>;
