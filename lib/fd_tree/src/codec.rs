use super::error::{error_context, fmterr, ioerr};
use super::{Node, TreeError, MAX_DEPTH};

use abst_fs::{self as fs, AbstPath};

use serde::{Deserialize, Serialize};
use tracing::info;

/// Persisted shape of a node: files have a size and null children, directories
/// have a null size and a sequence of children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersistedNode {
    pub name: String,
    pub size: Option<u64>,
    pub children: Option<Vec<PersistedNode>>,
}

impl From<&Node> for PersistedNode {
    fn from(node: &Node) -> PersistedNode {
        PersistedNode {
            name: node.name().to_string(),
            size: node.size(),
            children: node
                .children()
                .map(|children| children.iter().map(PersistedNode::from).collect()),
        }
    }
}
impl From<Node> for PersistedNode {
    fn from(node: Node) -> PersistedNode {
        PersistedNode::from(&node)
    }
}

impl TryFrom<PersistedNode> for Node {
    type Error = TreeError;
    fn try_from(persisted: PersistedNode) -> Result<Node, TreeError> {
        let root = persisted.name.clone();
        from_persisted_rec(persisted, &root, 0)
    }
}

fn from_persisted_rec(
    PersistedNode {
        name,
        size,
        children,
    }: PersistedNode,
    path: &str,
    depth: usize,
) -> Result<Node, TreeError> {
    let errctx = error_context(format!("could not decode node at path {path}"));
    if depth > MAX_DEPTH {
        return Err(TreeError::TooDeep {
            path: path.to_string(),
            limit: MAX_DEPTH,
        });
    }
    match (size, children) {
        (Some(size), None) => Ok(Node::file(name, size)),
        (None, None) => Err(fmterr(
            errctx("decode file"),
            "file record has no size",
        )),
        (Some(_), Some(_)) => Err(fmterr(
            errctx("decode directory"),
            "directory record has a size",
        )),
        (None, Some(children)) => {
            let children = children
                .into_iter()
                .map(|child| {
                    let subpath = format!("{path}/{}", child.name);
                    from_persisted_rec(child, &subpath, depth + 1)
                })
                .collect::<Result<Vec<Node>, TreeError>>()?;
            Node::dir(name, children).map_err(|err| fmterr(errctx("decode directory"), err))
        }
    }
}

/// Save a tree to path, encoded according to the extension of path. Paths
/// without a yaml, toml or bin extension get `.yaml` appended. Returns the path
/// actually written
pub fn save(path: &AbstPath, tree: &Node) -> Result<AbstPath, TreeError> {
    let path = match fs::has_known_ext(path) {
        true => path.clone(),
        false => path.append_to_last(".yaml"),
    };
    let errctx = error_context(format!("could not save tree to path {path}"));
    fs::save(&path, &PersistedNode::from(tree)).map_err(ioerr(errctx("write file")))?;
    info!(%path, "saved tree");
    Ok(path)
}

/// Load a tree saved with [`save`]
pub fn load(path: &AbstPath) -> Result<Node, TreeError> {
    let errctx = error_context(format!("could not load tree from path {path}"));
    let tree = fs::load::<Node>(path).map_err(|err| match err {
        fs::Error::Unparsable { .. } | fs::Error::UnknownExtension { .. } => {
            fmterr(errctx("decode file"), err)
        }
        _ => ioerr(errctx("read file"))(err),
    })?;
    info!(%path, files = tree.file_count(), "loaded tree");
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::{load, save, Node, PersistedNode, TreeError, MAX_DEPTH};
    use abst_fs::AbstPath;

    fn tree() -> Node {
        Node::dir(
            "root",
            vec![
                Node::file("a", 10),
                Node::file("zero", 0),
                Node::dir(
                    "sub",
                    vec![Node::file("caf\u{e9}", 5), Node::empty_dir("void")],
                )
                .unwrap(),
                Node::empty_dir("empty"),
            ],
        )
        .unwrap()
    }

    fn round_trip(node: &Node) {
        let persisted = PersistedNode::from(node);
        assert_eq!(&Node::try_from(persisted).unwrap(), node);
    }

    #[test]
    fn round_trips() {
        round_trip(&tree());
        round_trip(&Node::empty_dir("empty"));
        round_trip(&Node::file("zero", 0));

        let yaml = serde_yaml::to_string(&tree()).unwrap();
        assert_eq!(serde_yaml::from_str::<Node>(&yaml).unwrap(), tree());

        let bin = bincode::serialize(&tree()).unwrap();
        assert_eq!(bincode::deserialize::<Node>(&bin).unwrap(), tree());
    }

    #[test]
    fn persisted_shape() {
        assert_eq!(
            PersistedNode::from(&Node::dir("d", vec![Node::file("f", 3)]).unwrap()),
            PersistedNode {
                name: "d".to_string(),
                size: None,
                children: Some(vec![PersistedNode {
                    name: "f".to_string(),
                    size: Some(3),
                    children: None
                }])
            }
        );
        assert_eq!(
            serde_yaml::to_string(&Node::file("f", 3)).unwrap(),
            "name: f\nsize: 3\nchildren: null\n"
        );
    }

    #[test]
    fn decoding_normalizes() {
        let yaml = "
name: root
size: null
children:
  - { name: b, size: 1, children: null }
  - { name: \"cafe\u{301}\", size: 2 }
  - { name: sub, children: [] }
";
        let node: Node = serde_yaml::from_str(yaml).unwrap();
        let names: Vec<&str> = node.children().unwrap().iter().map(Node::name).collect();
        assert_eq!(names, vec!["sub", "b", "caf\u{e9}"]);
    }

    #[test]
    fn malformed() {
        let decode = |yaml: &str| serde_yaml::from_str::<Node>(yaml);

        // children not a sequence
        assert!(decode("{ name: root, size: null, children: 3 }").is_err());
        // unknown key
        assert!(decode("{ name: root, children: [], owner: me }").is_err());
        // no name
        assert!(decode("{ size: 3, children: null }").is_err());
        // file without size
        assert!(decode("{ name: root, children: [ { name: f } ] }").is_err());
        // directory with size
        assert!(decode("{ name: root, size: 3, children: [] }").is_err());
        // duplicate children
        assert!(decode(
            "{ name: root, children: [ { name: f, size: 1 }, { name: f, size: 2 } ] }"
        )
        .is_err());

        let persisted = PersistedNode {
            name: "root".to_string(),
            size: None,
            children: Some(vec![PersistedNode {
                name: "f".to_string(),
                size: None,
                children: None,
            }]),
        };
        assert!(matches!(
            Node::try_from(persisted),
            Err(TreeError::Format { .. })
        ));
    }

    #[test]
    fn too_deep() {
        let mut persisted = PersistedNode {
            name: "leaf".to_string(),
            size: Some(1),
            children: None,
        };
        for _ in 0..=MAX_DEPTH {
            persisted = PersistedNode {
                name: "d".to_string(),
                size: None,
                children: Some(vec![persisted]),
            };
        }
        assert!(matches!(
            Node::try_from(persisted),
            Err(TreeError::TooDeep { .. })
        ));
    }

    #[test]
    fn files() {
        let tmp = tempfile::tempdir().unwrap();
        let root = AbstPath::from(tmp.path());

        let saved = save(&root.add_last("tree"), &tree()).unwrap();
        assert_eq!(saved, root.add_last("tree.yaml"));
        assert_eq!(load(&saved).unwrap(), tree());

        let saved = save(&root.add_last("tree.yml"), &tree()).unwrap();
        assert_eq!(saved, root.add_last("tree.yml"));
        assert_eq!(load(&saved).unwrap(), tree());

        let saved = save(&root.add_last("tree.toml"), &tree()).unwrap();
        assert_eq!(saved, root.add_last("tree.toml"));
        assert_eq!(load(&saved).unwrap(), tree());

        let saved = save(&root.add_last("tree.bin"), &tree()).unwrap();
        assert_eq!(saved, root.add_last("tree.bin"));
        assert_eq!(load(&saved).unwrap(), tree());

        let saved = save(&root.add_last("tree.backup"), &tree()).unwrap();
        assert_eq!(saved, root.add_last("tree.backup.yaml"));

        assert!(matches!(
            load(&root.add_last("missing.yaml")),
            Err(TreeError::Io { .. })
        ));

        let garbage = root.add_last("garbage.yaml");
        std::fs::write(garbage.to_path_buf(), "- just\n- a list\n").unwrap();
        assert!(matches!(load(&garbage), Err(TreeError::Format { .. })));

        let text = root.add_last("notes.txt");
        std::fs::write(text.to_path_buf(), "name: root\n").unwrap();
        assert!(matches!(load(&text), Err(TreeError::Format { .. })));
    }
}
