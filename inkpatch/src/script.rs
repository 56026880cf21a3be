//! # Scripts
//!
//! A script is a TOML document describing a sequence of edits, standing in for live pen and hotkey input:
//!
//! ```toml
//! name = "demo"
//!
//! [[step]]
//! op = "begin"
//! layer = 0
//!
//! [[step]]
//! op = "dab"
//! x = 10.0
//! y = 12.5
//! radius = 3.0
//! color = [255, 0, 0, 255]
//!
//! [[step]]
//! op = "end"
//! label = "Red dot"
//! ```

#[derive(serde::Deserialize, Clone, Debug, PartialEq, strum::AsRefStr)]
#[serde(tag = "op", rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Step {
    /// Start a gesture on the layer at this index.
    Begin { layer: usize },
    Dab {
        x: f32,
        y: f32,
        radius: f32,
        color: Vec<u8>,
    },
    Fill {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Vec<u8>,
    },
    End {
        #[serde(default)]
        label: Option<String>,
    },
    Cancel,
    Undo,
    Redo,
    Limit { n: i64 },
    Clear,
    /// Rename the newest applied entry.
    Relabel { label: String },
}

#[derive(serde::Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Script {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}
impl Script {
    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(source)?)
    }
    pub fn read(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        Self::from_toml(&source).with_context(|| format!("parsing script {}", path.display()))
    }
}

#[cfg(test)]
mod test {
    use super::{Script, Step};

    #[test]
    fn parse_every_op() {
        let script = Script::from_toml(
            r#"
            name = "all"
            [[step]]
            op = "begin"
            layer = 1
            [[step]]
            op = "dab"
            x = 1.5
            y = 2.0
            radius = 0.5
            color = [1, 2, 3, 4]
            [[step]]
            op = "fill"
            x = -1
            y = 0
            w = 3
            h = 2
            color = [9]
            [[step]]
            op = "end"
            [[step]]
            op = "end"
            label = "Stroke"
            [[step]]
            op = "cancel"
            [[step]]
            op = "undo"
            [[step]]
            op = "redo"
            [[step]]
            op = "limit"
            n = -1
            [[step]]
            op = "clear"
            [[step]]
            op = "relabel"
            label = "Renamed"
            "#,
        )
        .unwrap();
        assert_eq!(script.name.as_deref(), Some("all"));
        assert_eq!(
            script.steps,
            vec![
                Step::Begin { layer: 1 },
                Step::Dab {
                    x: 1.5,
                    y: 2.0,
                    radius: 0.5,
                    color: vec![1, 2, 3, 4]
                },
                Step::Fill {
                    x: -1,
                    y: 0,
                    w: 3,
                    h: 2,
                    color: vec![9]
                },
                Step::End { label: None },
                Step::End {
                    label: Some("Stroke".to_owned())
                },
                Step::Cancel,
                Step::Undo,
                Step::Redo,
                Step::Limit { n: -1 },
                Step::Clear,
                Step::Relabel {
                    label: "Renamed".to_owned()
                },
            ]
        );
    }
    #[test]
    fn empty_script() {
        assert_eq!(Script::from_toml("").unwrap(), Script::default());
    }
    #[test]
    fn unknown_op_rejected() {
        assert!(Script::from_toml("[[step]]\nop = \"smudge\"\n").is_err());
        assert!(Script::from_toml("[[step]]\nop = \"begin\"\n").is_err());
    }
    #[test]
    fn op_names() {
        assert_eq!(Step::Undo.as_ref(), "undo");
        assert_eq!(Step::Limit { n: 3 }.as_ref(), "limit");
    }
}
