//! Builds a small dialog from XUL, clicks its button and prints the result.
//!
//! Run with `RUST_LOG=ufo=debug` to see the toolkit's log output.

use ufo::widget::{Graphics, KeyboardModifiers, MouseButton};
use ufo::xul::Xul;
use ufo::{ToolkitConfig, UiSession};
use ufo_core::{Point, Rect};
use ufo_style::{Color, FontSpec};

const DIALOG: &str = r#"
<window title="Greeter" width="300" height="120" orient="vertical">
    <hbox align="center">
        <label value="Name" accesskey="n" control="name"/>
        <textbox id="name" flex="1" value="World"/>
    </hbox>
    <spacer/>
    <hbox pack="end">
        <button id="greet" label="Greet" accesskey="G" oncommand="greet"/>
    </hbox>
</window>
"#;

const SETTINGS: &str = r#"
font = "sans-serif 13"

[theme]
"UButton.border" = "line"
"#;

/// Prints text drawing commands in absolute coordinates.
struct TextDump {
    origin: Point,
    clip: Rect,
}

impl Graphics for TextDump {
    fn set_color(&mut self, _color: Color) {}

    fn fill_rect(&mut self, _rect: Rect) {}

    fn draw_rect(&mut self, _rect: Rect) {}

    fn draw_line(&mut self, _from: Point, _to: Point) {}

    fn draw_text(&mut self, text: &str, location: Point, _font: &FontSpec) {
        let at = location + self.origin;
        println!("  text {text:?} at ({}, {})", at.x, at.y);
    }

    fn clip_rect(&self) -> Rect {
        self.clip.offset(-self.origin.x, -self.origin.y)
    }

    fn set_clip_rect(&mut self, rect: Rect) {
        self.clip = rect.offset(self.origin.x, self.origin.y);
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.origin = self.origin.offset(dx, dy);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut session = UiSession::new();
    ToolkitConfig::from_toml_str(SETTINGS)?.apply(&mut session)?;

    let mut xul = Xul::new();
    xul.set_action("greet", |event| {
        println!("action '{}' fired", event.command);
    });
    xul.load_str(DIALOG)?;
    let parts = xul.create_root_pane(&mut session)?;
    println!("{}", xul.title().unwrap_or("untitled"));
    println!("{}", session.tree().debug_tree(parts.root));

    let greet = xul.get("greet").ok_or("no greet button")?;
    let bounds = session.tree().bounds(greet);
    let center = session
        .tree()
        .root_location(greet)
        .offset(bounds.w / 2, bounds.h / 2);
    session.mouse_pressed(center, MouseButton::Left, KeyboardModifiers::NONE)?;
    session.mouse_released(center, MouseButton::Left, KeyboardModifiers::NONE)?;
    println!("focus: {:?}", session.focused_widget());

    println!("paint:");
    let mut g = TextDump {
        origin: Point::ZERO,
        clip: session.bounds(),
    };
    session.paint(&mut g);
    Ok(())
}
