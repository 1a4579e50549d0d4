use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::naming;
use crate::node::Node;
use crate::output::{write_json, WriteOutcome};
use crate::report::RunReport;
use crate::settings::Limits;

/// Node types that may be saved on their own when they are large enough.
const COMPLEX_TYPES: [&str; 3] = ["COMPONENT_SET", "COMPONENT", "FRAME"];

#[derive(Debug, Serialize)]
pub struct ComponentsIndex {
    pub page_name: String,
    pub page_type: String,
    pub total_children: usize,
    pub components: Vec<ComponentRecord>,
}

#[derive(Debug, Serialize)]
pub struct ComponentRecord {
    pub index: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub children_count: usize,
}

pub fn is_complex(node: Node<'_>, limits: &Limits) -> bool {
    node.raw_kind().is_some_and(|k| COMPLEX_TYPES.contains(&k))
        && node.children_count() > limits.component_child_cutoff
}

/// Write `page_<NN>_<name>_index/` for a page with many children: a summary
/// of every direct child plus one file per complex component.
pub fn index_page(
    page: &Value,
    page_num: usize,
    safe_page_name: &str,
    output_dir: &Path,
    limits: &Limits,
    report: &mut RunReport,
) {
    let page = Node(page);
    let children = page.children();
    if children.is_empty() {
        return;
    }

    let dir = output_dir.join(naming::page_index_dir(page_num, safe_page_name));
    if let Err(e) = fs::create_dir_all(&dir) {
        report.record(
            WriteOutcome::Failed {
                path: dir,
                reason: e.to_string(),
            },
            4,
        );
        return;
    }

    let mut components = Vec::with_capacity(children.len());
    for (i, child) in children.iter().enumerate() {
        let child = Node(child);
        let name = child.name_or(|| format!("Component_{}", i + 1));

        if is_complex(child, limits) {
            let safe = naming::safe_name(&name, limits.component_name_len);
            let path = dir.join(naming::component_file(i + 1, &safe));
            if report.record(write_json(&path, child.0), 4).is_some() {
                println!("    -> saved complex component: {}", name);
            }
        }

        components.push(ComponentRecord {
            index: i + 1,
            name,
            kind: child.kind().to_string(),
            id: child.id().to_string(),
            children_count: child.children_count(),
        });
    }

    let index = ComponentsIndex {
        page_name: page.name_or(|| "Unknown".to_string()),
        page_type: page.kind().to_string(),
        total_children: children.len(),
        components,
    };
    report.record(write_json(&dir.join("components_index.json"), &index), 4);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn frame(kind: &str, name: &str, n: usize) -> Value {
        let kids: Vec<Value> = (0..n).map(|i| json!({"id": format!("c{}", i)})).collect();
        json!({"id": format!("{}-{}", kind, n), "name": name, "type": kind, "children": kids})
    }

    fn page(children: Vec<Value>) -> Value {
        json!({"id": "0:1", "name": "Components", "type": "CANVAS", "children": children})
    }

    #[test]
    fn complexity_needs_type_and_size() {
        let limits = Limits::default();
        assert!(is_complex(Node(&frame("FRAME", "a", 6)), &limits));
        assert!(is_complex(Node(&frame("COMPONENT_SET", "a", 9)), &limits));
        assert!(!is_complex(Node(&frame("FRAME", "a", 5)), &limits));
        assert!(!is_complex(Node(&frame("TEXT", "a", 10)), &limits));
        assert!(!is_complex(Node(&json!({"children": [1, 2, 3, 4, 5, 6]})), &limits));
    }

    #[test]
    fn writes_only_complex_components() {
        let dir = tempfile::tempdir().unwrap();
        let mut children = vec![
            frame("FRAME", "Big Frame", 6),
            frame("FRAME", "Small Frame", 5),
            frame("TEXT", "Wordy", 10),
            frame("COMPONENT", "Button/Primary", 7),
        ];
        children.extend((0..7).map(|i| json!({"id": format!("x{}", i), "type": "RECTANGLE"})));
        let page = page(children);

        let mut report = RunReport::new();
        index_page(&page, 2, "Components", dir.path(), &Limits::default(), &mut report);

        let sub = dir.path().join("page_02_Components_index");
        let written = sub.join("component_001_Big Frame.json");
        let saved: Value = serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
        assert_eq!(saved, page["children"][0]);
        assert!(sub.join("component_004_ButtonPrimary.json").exists());

        let files = fs::read_dir(&sub).unwrap().count();
        assert_eq!(files, 3);
        assert_eq!(report.written(), 3);
    }

    #[test]
    fn index_lists_every_child() {
        let dir = tempfile::tempdir().unwrap();
        let mut children: Vec<Value> = (0..11).map(|i| json!({"id": format!("n{}", i)})).collect();
        children[3] = json!({"id": "n3", "name": "Card", "type": "INSTANCE", "children": [{}]});
        let page = page(children);

        let mut report = RunReport::new();
        index_page(&page, 1, "Components", dir.path(), &Limits::default(), &mut report);

        let path = dir.path().join("page_01_Components_index").join("components_index.json");
        let index: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(index["page_name"], json!("Components"));
        assert_eq!(index["page_type"], json!("CANVAS"));
        assert_eq!(index["total_children"], json!(11));
        assert_eq!(index["components"].as_array().unwrap().len(), 11);
        assert_eq!(
            index["components"][0],
            json!({"index": 1, "name": "Component_1", "type": "UNKNOWN", "id": "n0", "children_count": 0})
        );
        assert_eq!(
            index["components"][3],
            json!({"index": 4, "name": "Card", "type": "INSTANCE", "id": "n3", "children_count": 1})
        );
    }

    #[test]
    fn long_component_names_are_cut_to_thirty() {
        let dir = tempfile::tempdir().unwrap();
        let long = "Navigation Drawer With Many Nested Sections";
        let mut children = vec![frame("FRAME", long, 8)];
        children.extend((0..10).map(|_| json!({})));

        let mut report = RunReport::new();
        index_page(&page(children), 5, "Nav", dir.path(), &Limits::default(), &mut report);

        let expected = format!("component_001_{}.json", &long[..30]);
        assert!(dir.path().join("page_05_Nav_index").join(expected).exists());
    }
}
