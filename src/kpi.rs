// src/kpi.rs
// =============================================================================
// This module fills KPI placeholders from a page's inline JSON data.
//
// A page carries its numbers in a script tag:
//
//   <script type="application/json" id="cr7-data">
//     { "national_team": { "goals": 135, "caps": 217, "as_of": "2025-06" },
//       "al_nassr":      { "goals": 99,  "games": 111, "as_of": "2025-05" } }
//   </script>
//
// and each value is written into the first element that exists among
// "#kpi-<group>-<field>" and "#chip-<group>-<field>".
//
// Nothing here is an error for the page: a missing script, group, field or
// target element is skipped. Bad JSON is logged and the page comes back
// unchanged.
// =============================================================================

use crate::error::KpiError;
use scraper::node::Text;
use scraper::{Html, Node, Selector};
use serde_json::Value;
use tracing::{debug, info, warn};

// id of the inline data script
pub const DATA_SCRIPT_ID: &str = "cr7-data";

// (group key, field key, candidate target ids in priority order)
const KPI_FIELDS: [(&str, &str, [&str; 2]); 6] = [
    ("national_team", "goals", ["kpi-intl-goals", "chip-intl-goals"]),
    ("national_team", "caps", ["kpi-intl-caps", "chip-intl-caps"]),
    ("national_team", "as_of", ["kpi-intl-asof", "chip-intl-asof"]),
    ("al_nassr", "goals", ["kpi-club-goals", "chip-club-goals"]),
    ("al_nassr", "games", ["kpi-club-games", "chip-club-games"]),
    ("al_nassr", "as_of", ["kpi-club-asof", "chip-club-asof"]),
];

// One text replacement to apply to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiUpdate {
    /// id of the element that receives the text
    pub target_id: String,
    pub text: String,
}

// Renders all KPIs into `html`, returning the page unchanged on any failure
pub fn render_kpis(html: &str) -> String {
    match try_render_kpis(html) {
        Ok(rendered) => rendered,
        Err(e) => {
            warn!("KPI: Error updating data: {}", e);
            html.to_string()
        }
    }
}

fn try_render_kpis(html: &str) -> Result<String, KpiError> {
    let mut document = Html::parse_document(html);

    let Some(data) = read_inline_data(&document)? else {
        warn!("KPI: No {} script found", DATA_SCRIPT_ID);
        return Ok(html.to_string());
    };

    let updates = plan_updates(&document, &data)?;

    // Nothing to write: hand back the page byte for byte instead of a
    // re-serialized copy
    if updates.is_empty() {
        debug!("KPI: no targets on page");
        return Ok(html.to_string());
    }

    apply_updates(&mut document, &updates)?;
    info!(updated = updates.len(), "KPI: Data updated");
    Ok(document.html())
}

// Reads and parses the inline data script, if the page has one
pub fn read_inline_data(document: &Html) -> Result<Option<Value>, KpiError> {
    let selector = id_selector(DATA_SCRIPT_ID)?;
    let Some(script) = document.select(&selector).next() else {
        return Ok(None);
    };

    let text: String = script.text().collect();
    let data: Value = serde_json::from_str(text.trim())?;
    Ok(Some(data))
}

// Works out which elements get which text
//
// Groups and fields that are absent (or null) are skipped, as are fields
// whose target elements don't exist on the page.
pub fn plan_updates(document: &Html, data: &Value) -> Result<Vec<KpiUpdate>, KpiError> {
    let mut updates = Vec::new();

    for (group_key, field_key, targets) in KPI_FIELDS {
        // Missing group or missing field: nothing to do
        let Some(value) = data.get(group_key).and_then(|group| group.get(field_key)) else {
            continue;
        };

        let Some(text) = scalar_text(value) else {
            debug!(group_key, field_key, "not a scalar, skipped");
            continue;
        };

        // kpi-* wins over chip-* when both exist
        match find_target(document, &targets)? {
            Some(target_id) => updates.push(KpiUpdate { target_id, text }),
            None => debug!(group_key, field_key, "no target element"),
        }
    }

    Ok(updates)
}

// Replaces the children of each target element with a single text node
//
// The element is looked up with the same id selector that planned the
// update, so whatever scraper matched is exactly what gets rewritten.
pub fn apply_updates(document: &mut Html, updates: &[KpiUpdate]) -> Result<(), KpiError> {
    for update in updates {
        let selector = id_selector(&update.target_id)?;

        // Grab the node id first; the select() borrow has to end before
        // the tree can be borrowed mutably
        let node_id = document.select(&selector).next().map(|element| element.id());
        let Some(mut node) = node_id.and_then(|id| document.tree.get_mut(id)) else {
            debug!(id = %update.target_id, "target vanished, skipped");
            continue;
        };

        // Drop the old content, nested elements included
        while let Some(mut child) = node.first_child() {
            child.detach();
        }

        // The serializer escapes text nodes, so the raw value goes in as is
        node.append(Node::Text(Text {
            text: update.text.as_str().into(),
        }));
    }

    Ok(())
}

// First target id present in the document
fn find_target(document: &Html, targets: &[&str]) -> Result<Option<String>, KpiError> {
    for id in targets {
        let selector = id_selector(id)?;
        if document.select(&selector).next().is_some() {
            return Ok(Some(id.to_string()));
        }
    }
    Ok(None)
}

fn id_selector(id: &str) -> Result<Selector, KpiError> {
    let css = format!(r#"[id="{}"]"#, id);
    Selector::parse(&css).map_err(|_| KpiError::Selector(css.clone()))
}

// Strings verbatim, numbers and booleans in their JSON form
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is document.tree?
//    - scraper keeps the parsed page as an ego_tree::Tree of nodes
//    - select() hands out read-only ElementRefs; tree.get_mut(id) gives a
//      NodeMut that can detach and append children
//
// 2. Why collect the node id before mutating?
//    - select() borrows the document immutably; Rust won't allow a mutable
//      borrow of the tree while that one is alive
//    - A NodeId is a plain Copy value, so it outlives the borrow
//
// 3. Where did the HTML escaping go?
//    - document.html() serializes text nodes with &, < and > escaped, so
//      the raw value is stored as is
// -----------------------------------------------------------------------------
