//! Applying record shapes to upstream payloads.

use serde_json::{Map, Value};
use tracing::debug;

use super::display::{NOT_AVAILABLE, display_value, is_truthy, truncate_line};
use super::shape::{Field, RecordShape, Source};

/// A normalized record: output key to value, in shape order.
pub type Record = Map<String, Value>;

/// One normalized payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Fully populated record.
    pub record: Record,
    /// Single summary line for the record.
    pub line: String,
}

/// A normalized list of payloads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedSet {
    /// Records in upstream order.
    pub records: Vec<Record>,
    /// One line per record, newline-joined, same order as `records`.
    pub summary: String,
}

impl NormalizedSet {
    /// Whether the upstream list yielded no usable record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// A record shape bound to runtime variables (site URLs and the like).
///
/// Variables are available to `Source::Template` fields and to the summary
/// line, after the record's own fields.
#[derive(Debug, Clone)]
pub struct Normalizer<'a> {
    shape: &'a RecordShape,
    vars: Vec<(&'a str, &'a str)>,
}

impl<'a> Normalizer<'a> {
    /// Bind a shape with no variables.
    pub fn new(shape: &'a RecordShape) -> Self {
        Self {
            shape,
            vars: Vec::new(),
        }
    }

    /// Add a template variable.
    pub fn with_var(mut self, name: &'a str, value: &'a str) -> Self {
        self.vars.push((name, value));
        self
    }

    /// Normalize a single payload.
    ///
    /// Never fails: a payload that is not an object simply yields a record
    /// made entirely of fallbacks.
    pub fn single(&self, raw: &Value) -> Normalized {
        let mut record = Record::new();
        for field in self.shape.fields {
            let value = self.extract(raw, field, &record);
            record.insert(field.key.to_string(), value);
        }

        let line = truncate_line(render(self.shape.line, &record, &self.vars));
        Normalized { record, line }
    }

    /// Normalize a list of payloads, skipping elements that are not objects.
    pub fn collection(&self, raw_list: &[Value]) -> NormalizedSet {
        let mut set = NormalizedSet::default();
        let mut lines = Vec::with_capacity(raw_list.len());

        for raw in raw_list {
            if !raw.is_object() {
                debug!("Skipping non-object {} entry", self.shape.kind);
                continue;
            }
            let normalized = self.single(raw);
            set.records.push(normalized.record);
            lines.push(normalized.line);
        }

        set.summary = lines.join("\n");
        set
    }

    fn extract(&self, raw: &Value, field: &Field, record: &Record) -> Value {
        let extracted = match field.source {
            Source::Path(path) => lookup(raw, path).cloned(),
            Source::FirstOf(paths) => paths
                .iter()
                .filter_map(|path| lookup(raw, path))
                .find(|v| !is_blank(v))
                .cloned(),
            Source::NameList { list, names } => join_names(raw.get(list), names),
            Source::Flags(flags) => {
                let labels: Vec<&str> = flags
                    .iter()
                    .filter(|(key, _)| raw.get(*key).is_some_and(is_truthy))
                    .map(|(_, label)| *label)
                    .collect();
                (!labels.is_empty()).then(|| Value::String(labels.join(", ")))
            }
            Source::Suffixed { path, suffix } => lookup(raw, path)
                .filter(|v| is_truthy(v))
                .map(|v| Value::String(format!("{}{}", display_value(v), suffix))),
            Source::Template(template) => Some(Value::String(render(template, record, &self.vars))),
        };

        extracted.unwrap_or_else(|| field.fallback.value())
    }
}

/// Normalize a single payload with a variable-free shape.
pub fn normalize_single(raw: &Value, shape: &RecordShape) -> Normalized {
    Normalizer::new(shape).single(raw)
}

/// Normalize a list of payloads with a variable-free shape.
pub fn normalize_collection(raw_list: &[Value], shape: &RecordShape) -> NormalizedSet {
    Normalizer::new(shape).collection(raw_list)
}

/// Follow a key path through nested objects.
///
/// Returns `None` when any step is missing, is not an object, or when the
/// final value is `null`.
pub fn lookup<'v>(raw: &'v Value, path: &[&str]) -> Option<&'v Value> {
    let mut current = raw;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    (!current.is_null()).then_some(current)
}

/// The `data` array of a `{ "data": [...] }` payload.
///
/// A missing or non-array `data` yields an empty slice, which callers treat
/// as "not found".
pub fn data_list(payload: &Value) -> &[Value] {
    payload
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn join_names(list: Option<&Value>, names: &[&str]) -> Option<Value> {
    let items = list?.as_array()?;
    if items.is_empty() {
        return None;
    }

    let joined: Vec<String> = items
        .iter()
        .map(|item| {
            names
                .iter()
                .filter_map(|name| lookup(item, &[*name]))
                .find(|v| !is_blank(v))
                .map(display_value)
                .unwrap_or_else(|| "Unknown".to_string())
        })
        .collect();

    Some(Value::String(joined.join(", ")))
}

/// Substitute `{name}` placeholders from the record, then from `vars`.
///
/// Unknown placeholders render as `N/A`; an unmatched `{` is kept literally.
fn render(template: &str, record: &Record, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        match record.get(name) {
            Some(value) => out.push_str(&display_value(value)),
            None => match vars.iter().find(|(var, _)| *var == name) {
                Some((_, value)) => out.push_str(value),
                None => out.push_str(NOT_AVAILABLE),
            },
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domains::normalizer::{Fallback, LINE_CHAR_LIMIT};
    use proptest::prelude::*;
    use serde_json::json;

    const ANY: RecordShape = RecordShape {
        kind: "any",
        fields: &[
            Field::at("seq", &["seq"]),
            Field::at("name", &["name"]),
            Field::at("nested", &["a", "b"]),
            Field::new("first", Source::FirstOf(&[&["name_en"], &["name"]])),
            Field::new(
                "drops",
                Source::NameList {
                    list: "items",
                    names: &["name_en", "name"],
                },
            ),
            Field::new("combo", Source::Flags(&[("combo_start", "Start")])),
            Field::new(
                "amount",
                Source::Suffixed {
                    path: &["amount_price"],
                    suffix: " pt",
                },
            )
            .or(Fallback::Empty),
            Field::at("count", &["count"]).or(Fallback::Zero),
            Field::new("link", Source::Template("{site}/x/{name}")),
        ],
        line: "{seq} | {name} | {nested} | {first} | {drops} | {combo} | {amount} | {count} | {link}",
    };

    fn normalizer() -> Normalizer<'static> {
        Normalizer::new(&ANY).with_var("site", "https://torampedia.my.id")
    }

    fn key() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("name".to_string()),
            Just("name_en".to_string()),
            Just("a".to_string()),
            Just("b".to_string()),
            Just("items".to_string()),
            Just("combo_start".to_string()),
            Just("amount_price".to_string()),
            Just("count".to_string()),
            "[a-z_]{1,8}",
        ]
    }

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            any::<f64>().prop_map(|f| serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null)),
            "[a-z {}\\n\\r]{0,16}".prop_map(Value::String),
            ".{0,40}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 64, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::vec((key(), inner), 0..6)
                    .prop_map(|entries| Value::Object(entries.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn single_fills_every_key_on_one_line(raw in json_value()) {
            let normalized = normalizer().single(&raw);

            for field in ANY.fields {
                prop_assert!(normalized.record.contains_key(field.key), "missing {}", field.key);
            }
            prop_assert_eq!(normalized.record.len(), ANY.fields.len());
            prop_assert!(!normalized.line.contains(['\n', '\r']));
            prop_assert!(normalized.line.chars().count() <= LINE_CHAR_LIMIT);
        }

        #[test]
        fn collection_keeps_one_line_per_record_in_order(
            entries in prop::collection::vec((json_value(), any::<bool>()), 1..12),
        ) {
            let mut raw_list = Vec::new();
            let mut expected = Vec::new();
            for (seq, (value, wrap)) in entries.into_iter().enumerate() {
                match value {
                    Value::Object(mut map) => {
                        map.insert("seq".to_string(), json!(seq));
                        raw_list.push(Value::Object(map));
                        expected.push(seq);
                    }
                    other if wrap => {
                        raw_list.push(json!({"seq": seq, "name": other}));
                        expected.push(seq);
                    }
                    other => raw_list.push(other),
                }
            }

            let set = normalizer().collection(&raw_list);

            prop_assert_eq!(set.records.len(), expected.len());
            let lines: Vec<&str> = set.summary.lines().collect();
            prop_assert_eq!(lines.len(), expected.len());
            for ((line, record), seq) in lines.iter().zip(&set.records).zip(&expected) {
                let prefix = format!("{} | ", seq);
                prop_assert!(line.starts_with(&prefix), "{:?} does not start with {:?}", line, prefix);
                prop_assert_eq!(&record["seq"], &json!(seq));
            }
        }
    }
}
