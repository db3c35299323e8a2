//! Static HTML output
//!
//! The document needs no script. Base layers are radio inputs and overlays
//! are checkboxes placed at the top of the container, so `:checked ~`
//! selectors can show or hide the layer divs that follow them. Popups are
//! `:target` boxes opened by the link wrapping each circle.

use crate::{
    core::geo::Point,
    rendering::{
        context::{ControlPanel, DrawCommand, LayerPass, LayerToggle},
        surface::{Scene, Surface},
    },
    ui::{controls::ControlPosition, legend::LegendRow, popup::escape_html},
    Result,
};
use std::fmt::Write as _;
use std::io::Write;

const BASE_CSS: &str = r#"
body { margin: 0; font-family: "Helvetica Neue", Arial, Helvetica, sans-serif; }
.quakemap { position: relative; overflow: hidden; background: #ddd; }
.qm-toggle { display: none; }
.qm-layer { position: absolute; inset: 0; }
.qm-toggled { display: none; }
.qm-tile { position: absolute; user-select: none; }
.qm-overlay { position: absolute; left: 0; top: 0; }
.qm-overlay a { cursor: pointer; }
.qm-popup-pane { position: absolute; inset: 0; pointer-events: none; z-index: 700; }
.qm-popup { display: none; position: absolute; left: 50%; top: 40%; transform: translate(-50%, -50%);
  pointer-events: auto; background: #fff; border-radius: 12px; padding: 1px 20px 13px 20px;
  box-shadow: 0 3px 14px rgba(0, 0, 0, 0.4); min-width: 220px; }
.qm-popup:target { display: block; }
.qm-popup-close { position: absolute; top: 4px; right: 8px; color: #757575; text-decoration: none; font: 16px/24px Tahoma, Verdana, sans-serif; }
.qm-corner { position: absolute; z-index: 800; display: flex; flex-direction: column; gap: 10px; margin: 10px; }
.qm-top-left { top: 0; left: 0; }
.qm-top-right { top: 0; right: 0; }
.qm-bottom-left { bottom: 0; left: 0; }
.qm-bottom-right { bottom: 0; right: 0; }
.qm-control { background: rgba(255, 255, 255, 0.9); border-radius: 5px; box-shadow: 0 1px 5px rgba(0, 0, 0, 0.4); padding: 6px 10px; font-size: 12px; }
.qm-control label { display: block; cursor: pointer; }
.qm-control-layers-separator { height: 0; border-top: 1px solid #ddd; margin: 5px -10px 5px -6px; }
.qm-check { display: inline-block; width: 1em; }
.qm-check::before { content: "\25CB"; }
.qm-attribution { font-size: 11px; padding: 0 5px; border-radius: 0; margin: -10px; }
.legend { line-height: 18px; color: #555; }
.legend h1 { font-size: 14px; margin: 0 0 6px 0; }
.legend i { width: 18px; height: 18px; float: left; margin-right: 8px; opacity: 0.9; }
"#;

/// Writes each presented scene as one self-contained HTML document
pub struct HtmlSurface<W: Write + Send> {
    writer: W,
    title: String,
}

impl<W: Write + Send> HtmlSurface<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            title: "Earthquakes".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Surface for HtmlSurface<W> {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        let document = render_document(scene, &self.title);
        self.writer.write_all(document.as_bytes())?;
        self.writer.flush()?;

        #[cfg(feature = "debug")]
        log::debug!("wrote {} bytes of HTML", document.len());

        Ok(())
    }
}

/// Restricts a string to characters usable in an HTML id and a CSS selector
pub fn css_ident(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect()
}

/// Pixel values rounded to two decimals
fn px(value: f64) -> String {
    format!("{}", (value * 100.0).round() / 100.0)
}

struct Ids<'a> {
    container: &'a str,
}

impl Ids<'_> {
    fn toggle(&self, layer_id: &str) -> String {
        format!("{}-toggle-{}", self.container, css_ident(layer_id))
    }

    fn layer(&self, layer_id: &str) -> String {
        format!("{}-layer-{}", self.container, css_ident(layer_id))
    }

    fn popup(&self, circle_id: &str) -> String {
        format!("{}-popup-{}", self.container, css_ident(circle_id))
    }
}

fn switcher(scene: &Scene) -> Option<(&[LayerToggle], &[LayerToggle])> {
    scene.controls.iter().find_map(|control| match control {
        ControlPanel::Layers {
            base_layers,
            overlays,
            ..
        } => Some((base_layers.as_slice(), overlays.as_slice())),
        _ => None,
    })
}

fn render_document(scene: &Scene, title: &str) -> String {
    let container = css_ident(&scene.container_id);
    let ids = Ids {
        container: &container,
    };
    let toggles = switcher(scene);
    let is_toggled =
        |layer_id: &str| toggles.is_some_and(|(b, o)| b.iter().chain(o).any(|t| t.layer_id == layer_id));

    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html lang=\"en\">");
    let _ = writeln!(html, "<head>");
    let _ = writeln!(html, "<meta charset=\"utf-8\">");
    let _ = writeln!(html, "<title>{}</title>", escape_html(title));
    let _ = writeln!(html, "<style>{}{}</style>", BASE_CSS, toggle_css(&ids, toggles));
    let _ = writeln!(html, "</head>");
    let _ = writeln!(html, "<body>");
    let _ = writeln!(
        html,
        "<div id=\"{}\" class=\"quakemap\" style=\"width:{}px;height:{}px\">",
        container,
        px(scene.width),
        px(scene.height)
    );

    if let Some((base_layers, overlays)) = toggles {
        for toggle in base_layers {
            let _ = writeln!(
                html,
                "<input type=\"radio\" class=\"qm-toggle\" name=\"{}-base\" id=\"{}\"{}>",
                container,
                ids.toggle(&toggle.layer_id),
                if toggle.checked { " checked" } else { "" }
            );
        }
        for toggle in overlays {
            let _ = writeln!(
                html,
                "<input type=\"checkbox\" class=\"qm-toggle\" id=\"{}\"{}>",
                ids.toggle(&toggle.layer_id),
                if toggle.checked { " checked" } else { "" }
            );
        }
    }

    let mut popups = String::new();
    for pass in &scene.layers {
        let toggled = is_toggled(&pass.id);
        if !toggled && !pass.visible {
            continue;
        }
        write_layer(&mut html, &mut popups, &ids, pass, toggled, scene);
    }

    let _ = writeln!(html, "<div class=\"qm-popup-pane\">\n{}</div>", popups);

    for position in [
        ControlPosition::TopLeft,
        ControlPosition::TopRight,
        ControlPosition::BottomLeft,
        ControlPosition::BottomRight,
    ] {
        let panels: Vec<&ControlPanel> = scene
            .controls
            .iter()
            .filter(|c| panel_position(c) == position)
            .collect();
        if panels.is_empty() {
            continue;
        }
        let _ = writeln!(html, "<div class=\"qm-corner {}\">", position.css_class());
        for panel in panels {
            write_control(&mut html, &ids, panel);
        }
        let _ = writeln!(html, "</div>");
    }

    let _ = writeln!(html, "</div>");
    let _ = writeln!(html, "</body>");
    let _ = writeln!(html, "</html>");
    html
}

fn toggle_css(ids: &Ids<'_>, toggles: Option<(&[LayerToggle], &[LayerToggle])>) -> String {
    let mut css = String::new();
    let Some((base_layers, overlays)) = toggles else {
        return css;
    };
    for toggle in base_layers.iter().chain(overlays) {
        let input = ids.toggle(&toggle.layer_id);
        let _ = writeln!(css, "#{input}:checked ~ #{} {{ display: block; }}", ids.layer(&toggle.layer_id));
        let _ = writeln!(
            css,
            "#{input}:checked ~ .qm-corner label[for=\"{input}\"] .qm-check::before {{ content: \"\\25C9\"; }}"
        );
    }
    for toggle in overlays {
        let _ = writeln!(
            css,
            "#{}:not(:checked) ~ .qm-popup-pane .popup-of-{} {{ display: none; }}",
            ids.toggle(&toggle.layer_id),
            css_ident(&toggle.layer_id)
        );
    }
    css
}

fn write_layer(
    html: &mut String,
    popups: &mut String,
    ids: &Ids<'_>,
    pass: &LayerPass,
    toggled: bool,
    scene: &Scene,
) {
    let _ = writeln!(
        html,
        "<div id=\"{}\" class=\"qm-layer qm-{}-layer{}\" style=\"z-index:{}\">",
        ids.layer(&pass.id),
        pass.layer_type,
        if toggled { " qm-toggled" } else { "" },
        pass.z_index
    );

    let mut svg = String::new();
    for command in &pass.commands {
        match command {
            DrawCommand::Tile { url, bounds, opacity } => {
                let (min, max) = bounds;
                let _ = writeln!(
                    html,
                    "<img class=\"qm-tile\" alt=\"\" src=\"{}\" style=\"left:{}px;top:{}px;width:{}px;height:{}px;opacity:{}\">",
                    escape_html(url),
                    px(min.x),
                    px(min.y),
                    px(max.x - min.x),
                    px(max.y - min.y),
                    opacity
                );
            }
            DrawCommand::Circle {
                id,
                center,
                style,
                popup,
            } => {
                let fill = style
                    .fill_color
                    .map(|c| c.to_hex())
                    .unwrap_or_else(|| "none".to_string());
                let circle = format!(
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\" stroke-width=\"{}\" stroke-opacity=\"{}\"/>",
                    px(center.x),
                    px(center.y),
                    px(style.radius),
                    fill,
                    style.fill_opacity,
                    style.stroke_color.to_hex(),
                    style.stroke_width,
                    style.stroke_opacity
                );
                match popup {
                    Some(content) => {
                        let popup_id = ids.popup(id);
                        let _ = writeln!(svg, "<a href=\"#{popup_id}\">{circle}</a>");
                        let _ = writeln!(
                            popups,
                            "<div id=\"{}\" class=\"qm-popup popup-of-{}\"><a class=\"qm-popup-close\" href=\"#\">&#215;</a><div class=\"qm-popup-content\">{}</div></div>",
                            popup_id,
                            css_ident(&pass.id),
                            content
                        );
                    }
                    None => {
                        let _ = writeln!(svg, "{circle}");
                    }
                }
            }
            DrawCommand::Polyline { points, style } => {
                let _ = writeln!(
                    svg,
                    "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-opacity=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/>",
                    path_data(points),
                    style.color.to_hex(),
                    style.width,
                    style.opacity
                );
            }
        }
    }

    if !svg.is_empty() {
        let _ = writeln!(
            html,
            "<svg class=\"qm-overlay\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{svg}</svg>",
            w = px(scene.width),
            h = px(scene.height),
        );
    }
    let _ = writeln!(html, "</div>");
}

fn path_data(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let _ = write!(d, "{}{} {}", if i == 0 { "M" } else { " L" }, px(p.x), px(p.y));
    }
    d
}

fn panel_position(panel: &ControlPanel) -> ControlPosition {
    match panel {
        ControlPanel::Legend { position, .. }
        | ControlPanel::Layers { position, .. }
        | ControlPanel::Attribution { position, .. } => *position,
    }
}

fn write_control(html: &mut String, ids: &Ids<'_>, panel: &ControlPanel) {
    match panel {
        ControlPanel::Legend { title, rows, .. } => write_legend(html, title, rows),
        ControlPanel::Layers {
            base_layers,
            overlays,
            ..
        } => {
            let _ = writeln!(html, "<div class=\"qm-control qm-control-layers\">");
            let _ = writeln!(html, "<div class=\"qm-control-layers-base\">");
            for toggle in base_layers {
                write_toggle_label(html, ids, toggle);
            }
            let _ = writeln!(html, "</div>");
            if !overlays.is_empty() {
                let _ = writeln!(html, "<div class=\"qm-control-layers-separator\"></div>");
                let _ = writeln!(html, "<div class=\"qm-control-layers-overlays\">");
                for toggle in overlays {
                    write_toggle_label(html, ids, toggle);
                }
                let _ = writeln!(html, "</div>");
            }
            let _ = writeln!(html, "</div>");
        }
        ControlPanel::Attribution { entries, .. } => {
            if entries.is_empty() {
                return;
            }
            // Attribution strings are provider-supplied HTML
            let _ = writeln!(
                html,
                "<div class=\"qm-control qm-attribution\">{}</div>",
                entries.join(" | ")
            );
        }
    }
}

fn write_toggle_label(html: &mut String, ids: &Ids<'_>, toggle: &LayerToggle) {
    let _ = writeln!(
        html,
        "<label for=\"{}\"><span class=\"qm-check\"></span> {}</label>",
        ids.toggle(&toggle.layer_id),
        escape_html(&toggle.label)
    );
}

fn write_legend(html: &mut String, title: &str, rows: &[LegendRow]) {
    let _ = write!(html, "<div class=\"qm-control info legend\"><h1>{}</h1>", escape_html(title));
    for (i, row) in rows.iter().enumerate() {
        let _ = write!(
            html,
            "<i style=\"background:{}\"></i> {}",
            row.color.to_hex(),
            escape_html(&row.label)
        );
        if i + 1 < rows.len() {
            html.push_str("<br>");
        }
    }
    let _ = writeln!(html, "</div>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        layers::base::LayerType,
        rendering::context::CircleRenderStyle,
        style::{color::Color, scale::ColorScale},
        ui::legend::Legend,
    };

    fn pass(id: &str, layer_type: LayerType, visible: bool, commands: Vec<DrawCommand>) -> LayerPass {
        LayerPass {
            id: id.to_string(),
            name: id.to_string(),
            layer_type,
            visible,
            z_index: 0,
            attribution: None,
            commands,
        }
    }

    fn circle() -> DrawCommand {
        DrawCommand::Circle {
            id: "quake-0".to_string(),
            center: Point::new(10.0, 20.0),
            style: CircleRenderStyle {
                radius: 18.0,
                fill_color: Some(Color::rgb(0xfe, 0xd9, 0x76)),
                stroke_color: Color::GREY,
                stroke_width: 1.0,
                stroke_opacity: 1.0,
                fill_opacity: 0.75,
            },
            popup: Some("<h3>Location: 10km ENE of X</h3>".to_string()),
        }
    }

    fn render(scene: &Scene) -> String {
        let mut surface = HtmlSurface::new(Vec::new());
        surface.present(scene).unwrap();
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn test_css_ident() {
        assert_eq!(css_ident("quake-12"), "quake-12");
        assert_eq!(css_ident("us 7000 l8a?"), "us-7000-l8a-");
    }

    #[test]
    fn test_document_contains_container_and_circle() {
        let scene = Scene {
            container_id: "map".to_string(),
            width: 800.0,
            height: 600.0,
            layers: vec![pass("earthquakes", LayerType::Group, true, vec![circle()])],
            controls: vec![],
        };
        let html = render(&scene);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<div id=\"map\" class=\"quakemap\" style=\"width:800px;height:600px\">"));
        assert!(html.contains("r=\"18\" fill=\"#fed976\""));
        assert!(html.contains("<a href=\"#map-popup-quake-0\">"));
        assert!(html.contains("id=\"map-popup-quake-0\" class=\"qm-popup popup-of-earthquakes\""));
        assert!(html.contains("Location: 10km ENE of X"));
        // no switcher means no toggle inputs
        assert!(!html.contains("type=\"radio\""));
    }

    #[test]
    fn test_hidden_layers_without_switcher_are_omitted() {
        let scene = Scene {
            container_id: "map".to_string(),
            width: 100.0,
            height: 100.0,
            layers: vec![pass("topography", LayerType::Tile, false, vec![])],
            controls: vec![],
        };
        assert!(!render(&scene).contains("map-layer-topography"));
    }

    #[test]
    fn test_switcher_emits_inputs_labels_and_rules() {
        let toggle = |id: &str, checked| LayerToggle {
            layer_id: id.to_string(),
            label: id.to_string(),
            checked,
        };
        let scene = Scene {
            container_id: "map".to_string(),
            width: 100.0,
            height: 100.0,
            layers: vec![
                pass("street", LayerType::Tile, true, vec![]),
                pass("topography", LayerType::Tile, false, vec![]),
                pass("earthquakes", LayerType::Group, true, vec![circle()]),
            ],
            controls: vec![ControlPanel::Layers {
                position: ControlPosition::TopRight,
                base_layers: vec![toggle("street", true), toggle("topography", false)],
                overlays: vec![toggle("earthquakes", true)],
            }],
        };
        let html = render(&scene);

        assert!(html.contains("<input type=\"radio\" class=\"qm-toggle\" name=\"map-base\" id=\"map-toggle-street\" checked>"));
        assert!(html.contains("<input type=\"radio\" class=\"qm-toggle\" name=\"map-base\" id=\"map-toggle-topography\">"));
        assert!(html.contains("<input type=\"checkbox\" class=\"qm-toggle\" id=\"map-toggle-earthquakes\" checked>"));
        assert!(html.contains("#map-toggle-topography:checked ~ #map-layer-topography { display: block; }"));
        assert!(html.contains("#map-toggle-earthquakes:not(:checked) ~ .qm-popup-pane .popup-of-earthquakes"));
        assert!(html.contains("<label for=\"map-toggle-topography\">"));
        assert!(html.contains("qm-corner qm-top-right"));
        assert!(html.contains("id=\"map-layer-topography\" class=\"qm-layer qm-tile-layer qm-toggled\""));
    }

    #[test]
    fn test_legend_markup() {
        let legend = Legend::from_scale(&ColorScale::default());
        let scene = Scene {
            container_id: "map".to_string(),
            width: 100.0,
            height: 100.0,
            layers: vec![],
            controls: vec![ControlPanel::Legend {
                position: ControlPosition::BottomRight,
                title: legend.title().to_string(),
                rows: legend.rows().to_vec(),
            }],
        };
        let html = render(&scene);

        assert!(html.contains("<h1>Earthquake Depth (kms)</h1>"));
        assert_eq!(html.matches("<i style=\"background:").count(), 6);
        assert!(html.contains("<i style=\"background:#ffffb2\"></i> -10–10<br>"));
        assert!(html.contains("</i> 90+</div>"));
        assert!(html.contains("qm-corner qm-bottom-right"));
    }

    #[test]
    fn test_polyline_path_data() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.234, 5.0), Point::new(2.0, 3.0)];
        assert_eq!(path_data(&points), "M0 0 L1.23 5 L2 3");
    }
}
