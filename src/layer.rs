use crate::document::style::toggle_display;
use crate::document::tree::{Document, INKSCAPE_NS, NodeId};
use crate::foundation::error::{LayerExportError, LayerExportResult};
use crate::frames::resolve::resolve_max_frame;
use crate::frames::spec::{FrameSet, expand, extract_spec_text};

/// `inkscape:groupmode` value that marks a group as a layer.
pub const LAYER_GROUPMODE: &str = "layer";

/// How a layer behaves across the whole export. Fixed once frames are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerState {
    /// No `__[...]` in the label: hidden in every frame.
    NoSpec,
    /// A spec that expanded to nothing: hidden in every frame.
    EmptyFrames,
    /// Visible exactly in its member frames.
    Frames,
}

/// Return `true` for `<g inkscape:groupmode="layer">`.
pub fn is_layer(doc: &Document, id: NodeId) -> bool {
    let Some(el) = doc.element(id) else {
        return false;
    };
    el.local_name() == "g"
        && doc.attribute_ns(id, INKSCAPE_NS, "groupmode") == Some(LAYER_GROUPMODE)
}

/// One layer group of the document and the frames it is visible in.
#[derive(Clone, Debug)]
pub struct Layer {
    node: NodeId,
    name: String,
    style_text: Option<String>,
    spec_text: String,
    frames: FrameSet,
}

impl Layer {
    /// Wrap a layer node. Frames stay empty until [`Layer::resolve_frames`].
    pub fn from_node(doc: &Document, node: NodeId) -> Self {
        let name = doc
            .attribute_ns(node, INKSCAPE_NS, "label")
            .unwrap_or_default()
            .to_string();
        let spec_text = extract_spec_text(&name).to_string();
        Self {
            node,
            style_text: doc.attribute(node, "style").map(str::to_string),
            spec_text,
            name,
            frames: FrameSet::default(),
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Layer label as shown in Inkscape.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Style attribute as found in the source document.
    pub fn style_text(&self) -> Option<&str> {
        self.style_text.as_deref()
    }

    /// Raw spec between `__[` and `]`, empty for layers without one.
    pub fn spec_text(&self) -> &str {
        &self.spec_text
    }

    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    pub fn state(&self) -> LayerState {
        if self.spec_text.is_empty() {
            LayerState::NoSpec
        } else if self.frames.is_empty() {
            LayerState::EmptyFrames
        } else {
            LayerState::Frames
        }
    }

    /// Expand the spec against the document's resolved max frame.
    pub fn resolve_frames(&mut self, max_frame: u32) -> LayerExportResult<()> {
        self.frames = expand(&self.spec_text, max_frame)
            .map_err(|bad| LayerExportError::invalid_token(self.name.as_str(), bad.0))?;
        Ok(())
    }

    pub fn is_visible_in(&self, frame: u32) -> bool {
        self.frames.contains(frame)
    }

    /// Show or hide the node for `frame` and return the new style string.
    pub fn apply_visibility(&self, doc: &mut Document, frame: u32) -> LayerExportResult<String> {
        let current = doc.attribute(self.node, "style").map(str::to_string);
        let style = toggle_display(current.as_deref(), self.is_visible_in(frame)).map_err(|e| {
            match e {
                LayerExportError::MalformedStyle { entry, style, .. } => {
                    LayerExportError::MalformedStyle {
                        layer: self.name.clone(),
                        frame: Some(frame),
                        entry,
                        style,
                    }
                }
                other => other,
            }
        })?;
        tracing::debug!(
            layer = %self.name,
            from = current.as_deref().unwrap_or(""),
            to = %style,
            "style rewritten"
        );
        doc.set_attribute(self.node, "style", &style)?;
        Ok(style)
    }
}

/// All layers of a document, in document order, with resolved frames.
#[derive(Clone, Debug)]
pub struct LayerSet {
    layers: Vec<Layer>,
    max_frame: u32,
}

impl LayerSet {
    /// Find every layer (sub-layers included), resolve the max frame and expand all specs.
    #[tracing::instrument(skip(doc))]
    pub fn from_document(doc: &Document) -> LayerExportResult<Self> {
        let mut layers: Vec<Layer> = doc
            .elements()
            .into_iter()
            .filter(|&id| is_layer(doc, id))
            .map(|id| Layer::from_node(doc, id))
            .collect();

        let max_frame = resolve_max_frame(&layers)?;
        for layer in &mut layers {
            layer.resolve_frames(max_frame)?;
            tracing::info!(
                layer = %layer.name,
                state = ?layer.state(),
                frames = ?layer.frames.to_vec(),
                "layer"
            );
        }

        Ok(Self { layers, max_frame })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Last frame to render; frames are numbered from 1.
    pub fn max_frame(&self) -> u32 {
        self.max_frame
    }

    /// Show every layer that belongs to `frame` and hide all others.
    pub fn apply_frame(&self, doc: &mut Document, frame: u32) -> LayerExportResult<()> {
        for layer in &self.layers {
            layer.apply_visibility(doc, frame)?;
        }
        Ok(())
    }

    /// Serializable overview, one entry per layer.
    pub fn summary(&self) -> Vec<LayerSummary> {
        self.layers
            .iter()
            .map(|l| LayerSummary {
                name: l.name.clone(),
                spec: l.spec_text.clone(),
                state: l.state(),
                frames: l.frames.clone(),
            })
            .collect()
    }
}

/// One row of [`LayerSet::summary`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LayerSummary {
    pub name: String,
    pub spec: String,
    pub state: LayerState,
    pub frames: FrameSet,
}

#[cfg(test)]
#[path = "../tests/unit/layer.rs"]
mod tests;
