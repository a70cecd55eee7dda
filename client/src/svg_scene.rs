use std::rc::Weak;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, MouseEvent, SvgElement};

use explorer_shared::colors;
use explorer_shared::scene::{ShapeStyle, labels_visible};
use explorer_shared::{
    Highlight, Outline, PointerPos, Region, RegionEvent, RegionEventKind, Scene, SceneKind,
    SceneLayout, SceneStyler, ShapeRegistry, ViewportTransform,
};

use crate::config::SVG_ID;
use crate::map_state::MapShell;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const COMPASS_INSET: f64 = 50.0;

const POINTER_EVENTS: [(&str, RegionEventKind); 4] = [
    ("click", RegionEventKind::Click),
    ("mouseenter", RegionEventKind::Enter),
    ("mousemove", RegionEventKind::Move),
    ("mouseleave", RegionEventKind::Leave),
];

fn svg_element(document: &Document, tag: &str) -> Result<Element, String> {
    document
        .create_element_ns(Some(SVG_NS), tag)
        .map_err(|e| format!("create <{tag}>: {e:?}"))
}

fn set_attrs(el: &Element, attrs: &[(&str, &str)]) {
    for (name, value) in attrs {
        let _ = el.set_attribute(name, value);
    }
}

fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(f64::INFINITY)
}

/// Shapes and labels of one scene, shared by both rendering paths.
struct ShapeSet {
    shapes: ShapeRegistry<Element>,
    labels: Vec<Element>,
    styler: SceneStyler,
    _listeners: Vec<Closure<dyn FnMut(MouseEvent)>>,
}

impl ShapeSet {
    fn build(
        document: &Document,
        parent: &Element,
        layout: &SceneLayout,
        shell: &Weak<MapShell>,
    ) -> Result<Self, String> {
        let styler = SceneStyler::new(layout.kind);
        let mut shapes = ShapeRegistry::new();
        let mut listeners = Vec::with_capacity(layout.regions.len() * POINTER_EVENTS.len());

        for region in &layout.regions {
            if shapes.get(&region.key).is_some() {
                web_sys::console::warn_1(&format!("duplicate region key: {}", region.key).into());
                continue;
            }
            let el = shape_element(document, region)?;
            let base = Highlight::Base;
            paint(&el, &base.style(region.group), None, styler.stroke_width(base, region.group));
            for (name, kind) in POINTER_EVENTS {
                let cb = region_listener(shell.clone(), region.key.clone(), kind);
                el.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())
                    .map_err(|e| format!("listen {name}: {e:?}"))?;
                listeners.push(cb);
            }
            let _ = parent.append_child(&el);
            shapes.insert(region.clone(), el);
        }

        let font_px = styler.label_px();
        let visible = labels_visible(viewport_width());
        let mut labels = Vec::new();
        for label in layout.regions.iter().filter_map(|r| r.label.as_ref()) {
            let text = svg_element(document, "text")?;
            set_attrs(
                &text,
                &[
                    ("x", label.x.to_string().as_str()),
                    ("y", label.y.to_string().as_str()),
                    ("text-anchor", "middle"),
                    ("fill", colors::LABEL_FILL),
                    ("pointer-events", "none"),
                    ("class", "county-label"),
                ],
            );
            text.set_text_content(Some(&label.text));
            if let Some(svg) = text.dyn_ref::<SvgElement>() {
                let style = svg.style();
                let _ = style.set_property("font-size", &format!("{font_px}px"));
                if !visible {
                    let _ = style.set_property("display", "none");
                }
            }
            let _ = parent.append_child(&text);
            labels.push(text);
        }

        Ok(Self {
            shapes,
            labels,
            styler,
            _listeners: listeners,
        })
    }

    fn region(&self, key: &str) -> Option<&Region> {
        self.shapes.get(key).map(|entry| &entry.region)
    }

    fn highlight(&self, key: &str) -> Option<Highlight> {
        self.shapes.get(key).map(|entry| entry.highlight)
    }

    fn restyle(&mut self, key: &str, highlight: Highlight) -> bool {
        let Some(entry) = self.shapes.get_mut(key) else {
            return false;
        };
        entry.highlight = highlight;
        paint(
            &entry.handle,
            &highlight.style(entry.region.group),
            Some(highlight.transition_ms()),
            self.styler.stroke_width(highlight, entry.region.group),
        );
        true
    }

    /// Keep stroke and label weight constant on screen under the new scale.
    fn rescale(&mut self, transform: &ViewportTransform) {
        self.styler.rescale(transform);
        for entry in self.shapes.iter() {
            let width = self.styler.stroke_width(entry.highlight, entry.region.group);
            let _ = entry.handle.set_attribute("stroke-width", &width.to_string());
        }
        let font_px = self.styler.label_px();
        for label in &self.labels {
            if let Some(svg) = label.dyn_ref::<SvgElement>() {
                let _ = svg.style().set_property("font-size", &format!("{font_px}px"));
            }
        }
    }
}

fn shape_element(document: &Document, region: &Region) -> Result<Element, String> {
    let el = match &region.outline {
        Outline::Path(d) => {
            let el = svg_element(document, "path")?;
            let _ = el.set_attribute("d", d);
            el
        }
        Outline::Circle { cx, cy, r } => {
            let el = svg_element(document, "circle")?;
            set_attrs(
                &el,
                &[
                    ("cx", cx.to_string().as_str()),
                    ("cy", cy.to_string().as_str()),
                    ("r", r.to_string().as_str()),
                ],
            );
            el
        }
    };
    set_attrs(
        &el,
        &[
            ("id", region.key.as_str()),
            ("class", "county"),
            ("data-name", region.name.as_str()),
            ("data-region", region.group.as_str()),
            ("stroke", colors::SHAPE_STROKE),
        ],
    );
    Ok(el)
}

fn paint(el: &Element, style: &ShapeStyle, transition_ms: Option<u32>, stroke_width: f64) {
    let _ = el.set_attribute("stroke-width", &stroke_width.to_string());
    let Some(svg) = el.dyn_ref::<SvgElement>() else {
        return;
    };
    let css = svg.style();
    if let Some(ms) = transition_ms {
        let _ = css.set_property(
            "transition",
            &format!("fill {ms}ms ease, stroke-width {ms}ms ease, filter {ms}ms ease"),
        );
    }
    let _ = css.set_property("fill", style.fill);
    let _ = css.set_property("cursor", "pointer");
    match &style.filter {
        Some(filter) => {
            let _ = css.set_property("filter", filter);
        }
        None => {
            let _ = css.remove_property("filter");
        }
    }
}

fn region_listener(
    shell: Weak<MapShell>,
    key: String,
    kind: RegionEventKind,
) -> Closure<dyn FnMut(MouseEvent)> {
    Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
        let Some(shell) = shell.upgrade() else {
            return;
        };
        let pointer = PointerPos::new(e.client_x() as f64, e.client_y() as f64);
        shell.dispatch(kind, RegionEvent::new(key.clone(), pointer));
    })
}

fn root_svg(document: &Document, width: f64, height: f64) -> Result<Element, String> {
    let svg = svg_element(document, "svg")?;
    set_attrs(
        &svg,
        &[
            ("xmlns", SVG_NS),
            ("id", SVG_ID),
            ("width", "100%"),
            ("height", "100%"),
            ("viewBox", format!("0 0 {width} {height}").as_str()),
        ],
    );
    Ok(svg)
}

fn ocean(document: &Document, width: f64, height: f64) -> Result<Element, String> {
    let rect = svg_element(document, "rect")?;
    set_attrs(
        &rect,
        &[
            ("x", "0"),
            ("y", "0"),
            ("width", width.to_string().as_str()),
            ("height", height.to_string().as_str()),
            ("fill", colors::OCEAN),
        ],
    );
    Ok(rect)
}

/// North/east indicator. Sits outside the zoomed group.
fn compass(document: &Document, x: f64, y: f64) -> Result<Element, String> {
    let g = svg_element(document, "g")?;
    set_attrs(
        &g,
        &[
            ("class", "compass"),
            ("transform", format!("translate({x}, {y})").as_str()),
            ("pointer-events", "none"),
        ],
    );

    let parts: [(&str, &[(&str, &str)], Option<&str>); 7] = [
        (
            "circle",
            &[
                ("r", "20"),
                ("fill", "white"),
                ("stroke", colors::COMPASS_NORTH),
                ("stroke-width", "2"),
            ],
            None,
        ),
        (
            "line",
            &[
                ("x2", "0"),
                ("y2", "-15"),
                ("stroke", colors::COMPASS_NORTH),
                ("stroke-width", "2"),
            ],
            None,
        ),
        (
            "polygon",
            &[("points", "-5,-15 0,-20 5,-15"), ("fill", colors::COMPASS_NORTH)],
            None,
        ),
        (
            "line",
            &[
                ("x2", "15"),
                ("y2", "0"),
                ("stroke", colors::COMPASS_EAST),
                ("stroke-width", "2"),
            ],
            None,
        ),
        (
            "polygon",
            &[("points", "15,-5 20,0 15,5"), ("fill", colors::COMPASS_EAST)],
            None,
        ),
        (
            "text",
            &[
                ("y", "-25"),
                ("text-anchor", "middle"),
                ("font-size", "10"),
                ("fill", colors::COMPASS_NORTH),
            ],
            Some("N"),
        ),
        (
            "text",
            &[
                ("x", "25"),
                ("text-anchor", "middle"),
                ("dominant-baseline", "middle"),
                ("font-size", "10"),
                ("fill", colors::COMPASS_EAST),
            ],
            Some("E"),
        ),
    ];
    for (tag, attrs, text) in parts {
        let el = svg_element(document, tag)?;
        set_attrs(&el, attrs);
        if text.is_some() {
            el.set_text_content(text);
        }
        let _ = g.append_child(&el);
    }
    Ok(g)
}

/// Scene drawn from projected geographic shapes. The camera transform goes
/// on an inner `<g>`; the compass stays fixed.
pub struct ProjectedScene {
    svg: Element,
    root: Element,
    shapes: ShapeSet,
}

impl ProjectedScene {
    pub fn build(
        document: &Document,
        wrapper: &Element,
        layout: &SceneLayout,
        shell: &Weak<MapShell>,
    ) -> Result<Self, String> {
        let svg = root_svg(document, layout.width, layout.height)?;
        let _ = svg.set_attribute("style", "max-width: 100%; height: auto;");
        let root = svg_element(document, "g")?;
        let background = ocean(document, layout.width, layout.height)?;
        let _ = root.append_child(&background);
        let shapes = ShapeSet::build(document, &root, layout, shell)?;

        let rose = compass(document, layout.width - COMPASS_INSET, COMPASS_INSET)?;
        let _ = svg.append_child(&root);
        let _ = svg.append_child(&rose);
        wrapper
            .append_child(&svg)
            .map_err(|e| format!("mount svg: {e:?}"))?;
        Ok(Self { svg, root, shapes })
    }

    pub fn svg(&self) -> &Element {
        &self.svg
    }
}

impl Scene for ProjectedScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Projected
    }

    fn region(&self, key: &str) -> Option<&Region> {
        self.shapes.region(key)
    }

    fn highlight(&self, key: &str) -> Option<Highlight> {
        self.shapes.highlight(key)
    }

    fn set_highlight(&mut self, key: &str, highlight: Highlight) -> bool {
        self.shapes.restyle(key, highlight)
    }

    fn apply_transform(&mut self, transform: &ViewportTransform) {
        let _ = if transform.is_identity() {
            self.root.remove_attribute("transform")
        } else {
            self.root.set_attribute("transform", &transform.svg_transform())
        };
        self.shapes.rescale(transform);
    }
}

/// Hand-drawn schematic scene. The camera transform is a CSS matrix on the
/// whole `<svg>`.
pub struct FallbackScene {
    svg: Element,
    shapes: ShapeSet,
}

impl FallbackScene {
    pub fn build(
        document: &Document,
        wrapper: &Element,
        layout: &SceneLayout,
        shell: &Weak<MapShell>,
    ) -> Result<Self, String> {
        let svg = root_svg(document, layout.width, layout.height)?;
        let background = ocean(document, layout.width, layout.height)?;
        let _ = svg.append_child(&background);
        let shapes = ShapeSet::build(document, &svg, layout, shell)?;
        wrapper
            .append_child(&svg)
            .map_err(|e| format!("mount svg: {e:?}"))?;
        Ok(Self { svg, shapes })
    }
}

impl Scene for FallbackScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Fallback
    }

    fn region(&self, key: &str) -> Option<&Region> {
        self.shapes.region(key)
    }

    fn highlight(&self, key: &str) -> Option<Highlight> {
        self.shapes.highlight(key)
    }

    fn set_highlight(&mut self, key: &str, highlight: Highlight) -> bool {
        self.shapes.restyle(key, highlight)
    }

    fn apply_transform(&mut self, transform: &ViewportTransform) {
        if let Some(svg) = self.svg.dyn_ref::<SvgElement>() {
            let style = svg.style();
            if transform.is_identity() {
                let _ = style.remove_property("transform");
            } else {
                let _ = style.set_property("transform", &transform.css_matrix());
            }
        }
        self.shapes.rescale(transform);
    }
}
