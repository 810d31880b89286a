use roxmltree::{Document, Node, ParsingOptions};

use engine_logging::{engine_debug, engine_warn};
use harvester_core::GeographicBoundingBox;

use crate::xml::{NsQuery, WMS_PREFIX};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CapabilitiesError {
    #[error("capabilities document is not well-formed XML: {0}")]
    InvalidXml(String),
    #[error("could not decode capabilities response: {0}")]
    Decode(#[from] crate::DecodeError),
    #[error("remote service returned an exception: {0}")]
    ServiceException(String),
    #[error("unexpected root element {0:?}")]
    UnexpectedRoot(String),
}

/// Case-insensitive substring match on layer titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleFilter {
    needle: String,
}

impl TitleFilter {
    pub fn new(needle: &str) -> Self {
        Self {
            needle: needle.to_lowercase(),
        }
    }

    pub fn matches(&self, title: &str) -> bool {
        title.to_lowercase().contains(&self.needle)
    }
}

/// A requestable (leaf) layer of a capabilities document.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredLayer {
    pub name: Option<String>,
    pub title: String,
    pub abstract_text: Option<String>,
    pub keywords: Vec<String>,
    /// Reference systems declared on the layer or inherited from its ancestors.
    pub crs: Vec<String>,
    pub geographic_bbox: Option<GeographicBoundingBox>,
    pub queryable: bool,
}

impl DiscoveredLayer {
    /// Stable identifier: the layer name, or its title for unnamed layers.
    pub fn identifier(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Discovery {
    /// Leaf layers that passed the filter, in document order.
    pub layers: Vec<DiscoveredLayer>,
    /// Leaf layers dropped because they had neither `Title` nor `Name`.
    pub skipped: usize,
}

/// Parses a capabilities document and returns its leaf layers, filtered by
/// title. Container layers are never returned.
pub fn discover_layers(
    xml: &str,
    filter: Option<&TitleFilter>,
) -> Result<Discovery, CapabilitiesError> {
    // WMS 1.1.1 servers send a DOCTYPE, often with an internal subset.
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)
        .map_err(|err| CapabilitiesError::InvalidXml(err.to_string()))?;
    let query = NsQuery::for_document(&doc);
    check_root(&doc, &query)?;

    let mut discovery = Discovery::default();
    let leaves = doc.descendants().filter(|node| {
        query.is(*node, WMS_PREFIX, "Layer") && !query.has_descendant(*node, WMS_PREFIX, "Layer")
    });
    for node in leaves {
        let Some(layer) = read_layer(&query, node) else {
            engine_warn!(
                "Skipping layer at byte {} without Title or Name",
                node.range().start
            );
            discovery.skipped += 1;
            continue;
        };
        if let Some(filter) = filter {
            if !filter.matches(&layer.title) {
                continue;
            }
        }
        engine_debug!("Discovered layer {:?}", layer.title);
        discovery.layers.push(layer);
    }
    Ok(discovery)
}

fn check_root(doc: &Document<'_>, query: &NsQuery) -> Result<(), CapabilitiesError> {
    let root = doc.root_element();
    match root.tag_name().name() {
        "WMS_Capabilities" | "WMT_MS_Capabilities" => Ok(()),
        "ServiceExceptionReport" => {
            let message = root
                .descendants()
                .filter(|node| node.tag_name().name() == "ServiceException")
                .filter_map(|node| node.text())
                .map(str::trim)
                .collect::<Vec<_>>()
                .join("; ");
            Err(CapabilitiesError::ServiceException(message))
        }
        other => {
            engine_debug!("Namespaces in scope: {:?}", query.namespaces());
            Err(CapabilitiesError::UnexpectedRoot(other.to_string()))
        }
    }
}

fn read_layer(query: &NsQuery, node: Node<'_, '_>) -> Option<DiscoveredLayer> {
    let name = query.child_text(node, WMS_PREFIX, "Name");
    // Titles are trimmed; a whitespace-only title falls back to the name.
    let title = query
        .child_text(node, WMS_PREFIX, "Title")
        .or_else(|| name.clone())?;

    let keywords = query
        .child(node, WMS_PREFIX, "KeywordList")
        .map(|list| {
            query
                .children(list, WMS_PREFIX, "Keyword")
                .filter_map(|kw| kw.text())
                .map(str::trim)
                .filter(|kw| !kw.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(DiscoveredLayer {
        name,
        title,
        abstract_text: query.child_text(node, WMS_PREFIX, "Abstract"),
        keywords,
        crs: inherited_crs(query, node),
        geographic_bbox: inherited_bbox(query, node),
        queryable: node
            .attribute("queryable")
            .is_some_and(|value| value == "1" || value.eq_ignore_ascii_case("true")),
    })
}

/// CRS/SRS lists are additive down the layer tree.
fn inherited_crs(query: &NsQuery, node: Node<'_, '_>) -> Vec<String> {
    let mut chain: Vec<Node<'_, '_>> = node
        .ancestors()
        .filter(|n| query.is(*n, WMS_PREFIX, "Layer"))
        .collect();
    chain.reverse();

    let mut crs: Vec<String> = Vec::new();
    for layer in chain {
        let declared = query
            .children(layer, WMS_PREFIX, "CRS")
            .chain(query.children(layer, WMS_PREFIX, "SRS"))
            .filter_map(|n| n.text())
            // 1.1.1 allows several space-separated codes in one SRS element.
            .flat_map(str::split_whitespace);
        for code in declared {
            if !crs.iter().any(|existing| existing == code) {
                crs.push(code.to_string());
            }
        }
    }
    crs
}

/// The nearest layer (self first) that declares a geographic extent wins.
fn inherited_bbox(query: &NsQuery, node: Node<'_, '_>) -> Option<GeographicBoundingBox> {
    node.ancestors()
        .filter(|n| query.is(*n, WMS_PREFIX, "Layer"))
        .find_map(|layer| read_bbox(query, layer))
}

fn read_bbox(query: &NsQuery, layer: Node<'_, '_>) -> Option<GeographicBoundingBox> {
    if let Some(ex) = query.child(layer, WMS_PREFIX, "EX_GeographicBoundingBox") {
        let bound = |local: &str| -> Option<f64> {
            query.child_text(ex, WMS_PREFIX, local)?.parse().ok()
        };
        return Some(GeographicBoundingBox {
            west: bound("westBoundLongitude")?,
            east: bound("eastBoundLongitude")?,
            south: bound("southBoundLatitude")?,
            north: bound("northBoundLatitude")?,
        });
    }
    let ll = query.child(layer, WMS_PREFIX, "LatLonBoundingBox")?;
    let attr = |name: &str| -> Option<f64> { ll.attribute(name)?.trim().parse().ok() };
    Some(GeographicBoundingBox {
        west: attr("minx")?,
        south: attr("miny")?,
        east: attr("maxx")?,
        north: attr("maxy")?,
    })
}
