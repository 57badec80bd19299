//! Output writers for built datasets.
//!
//! Three formats are supported, mirroring what downstream training
//! pipelines typically ingest:
//!
//! - **JSON**: one object with parallel `contexts` / `responses` arrays
//! - **JSONL**: one `{"context": ..., "response": ...}` object per line
//! - **CSV**: semicolon-delimited `context;response` rows
//!
//! CSV cannot represent turn lists, so unflattened contexts are
//! space-joined for that format only; JSON and JSONL preserve the shape
//! the dataset was built with.

use std::fs::File;
#[cfg(feature = "json-output")]
use std::io::Write;

#[cfg(feature = "json-output")]
use crate::core::dataset::Contexts;
use crate::core::dataset::Dataset;
use crate::error::Result;

/// Converts a dataset to a pretty-printed JSON string.
///
/// Same content as [`write_json`], but returned as a `String`.
#[cfg(feature = "json-output")]
pub fn to_json(dataset: &Dataset) -> Result<String> {
    Ok(serde_json::to_string_pretty(dataset)?)
}

/// Writes a dataset to a JSON file.
///
/// # Format
/// ```json
/// {
///   "contexts": ["hi", "hi hello"],
///   "responses": ["hello", "how are you"]
/// }
/// ```
#[cfg(feature = "json-output")]
pub fn write_json(dataset: &Dataset, output_path: &str) -> Result<()> {
    let json = to_json(dataset)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Writes a dataset as JSON Lines, one example per line.
///
/// # Format
/// ```json
/// {"context":"hi","response":"hello"}
/// {"context":"hi hello","response":"how are you"}
/// ```
#[cfg(feature = "json-output")]
pub fn write_jsonl(dataset: &Dataset, output_path: &str) -> Result<()> {
    let mut file = File::create(output_path)?;
    for i in 0..dataset.len() {
        let context = match &dataset.contexts {
            Contexts::Turns(turns) => serde_json::json!(turns[i]),
            Contexts::Joined(joined) => serde_json::json!(joined[i]),
        };
        let line = serde_json::json!({
            "context": context,
            "response": dataset.responses[i],
        });
        writeln!(file, "{}", line)?;
    }
    Ok(())
}

/// Writes a dataset to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `context`, `response`
/// - Unflattened contexts are space-joined
#[cfg(feature = "csv-output")]
pub fn write_csv(dataset: &Dataset, output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(file);

    writer.write_record(["context", "response"])?;

    for i in 0..dataset.len() {
        let context = dataset.contexts.joined(i).unwrap_or_default();
        writer.write_record([&context, &dataset.responses[i]])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(unused_imports)]

    use super::*;
    use crate::core::dataset::Contexts;
    use std::io::Read;
    use tempfile::NamedTempFile;

    fn sample_dataset() -> Dataset {
        Dataset {
            contexts: Contexts::Joined(vec!["hi".to_string(), "hi hello".to_string()]),
            responses: vec!["hello".to_string(), "how are you".to_string()],
        }
    }

    fn read_back(path: &str) -> String {
        let mut content = String::new();
        std::fs::File::open(path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_to_json_shape() {
        let json = to_json(&sample_dataset()).unwrap();
        assert!(json.contains(r#""contexts""#));
        assert!(json.contains(r#""responses""#));
        assert!(json.contains("hi hello"));
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_write_json_roundtrip() {
        let dataset = sample_dataset();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_json(&dataset, path).unwrap();
        let parsed: Dataset = serde_json::from_str(&read_back(path)).unwrap();
        assert_eq!(parsed, dataset);
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_write_jsonl_one_line_per_example() {
        let dataset = sample_dataset();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_jsonl(&dataset, path).unwrap();
        let content = read_back(path);
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["context"], "hi");
        assert_eq!(first["response"], "hello");
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_write_jsonl_turn_lists() {
        let dataset = Dataset {
            contexts: Contexts::Turns(vec![vec!["hi".to_string(), "hello".to_string()]]),
            responses: vec!["how are you".to_string()],
        };
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_jsonl(&dataset, path).unwrap();
        let first: serde_json::Value =
            serde_json::from_str(read_back(path).lines().next().unwrap()).unwrap();
        assert_eq!(first["context"][1], "hello");
    }

    #[cfg(feature = "csv-output")]
    #[test]
    fn test_write_csv_header_and_rows() {
        let dataset = sample_dataset();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_csv(&dataset, path).unwrap();
        let content = read_back(path);
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "context;response");
        assert_eq!(lines[1], "hi;hello");
    }

    #[cfg(feature = "csv-output")]
    #[test]
    fn test_write_csv_joins_turn_lists() {
        let dataset = Dataset {
            contexts: Contexts::Turns(vec![vec!["hi".to_string(), "hello".to_string()]]),
            responses: vec!["how are you".to_string()],
        };
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_csv(&dataset, path).unwrap();
        assert!(read_back(path).contains("hi hello;how are you"));
    }
}
