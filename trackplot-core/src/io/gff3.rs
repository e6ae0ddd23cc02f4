use crate::coords::Position;
use crate::error::{Result, TrackplotError};
use crate::feature::{Feature, Segment, Strand};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One data line of a GFF3 file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gff3Record {
    pub seqid: String,
    pub source: String,
    pub feature_type: String,
    pub start: Position,
    pub end: Position,
    pub score: Option<f64>,
    pub strand: Option<Strand>,
    pub phase: Option<u8>,
    pub attributes: HashMap<String, String>,
}

impl Gff3Record {
    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attribute("ID")
    }

    /// Parent IDs; a record may belong to several parents.
    pub fn parents(&self) -> Vec<&str> {
        self.get_attribute("Parent")
            .map(|p| p.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Best human-readable name: Name, gene, gene_name, then ID
    pub fn display_name(&self) -> Option<&str> {
        self.get_attribute("Name")
            .or_else(|| self.get_attribute("gene"))
            .or_else(|| self.get_attribute("gene_name"))
            .or_else(|| self.id())
    }

    fn to_feature(&self) -> Feature {
        let name = self
            .display_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}:{}-{}", self.seqid, self.start, self.end));
        let mut feature = Feature::new(name, self.start, self.end);
        feature.strand = self.strand;
        feature.title = self.get_attribute("Note").map(str::to_string);
        feature
    }
}

/// Which records a track keeps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gff3Filter {
    /// Keep only records on this sequence
    #[serde(default)]
    pub seqid: Option<String>,
    /// Keep only these feature types; empty keeps all
    #[serde(default)]
    pub feature_types: Vec<String>,
}

impl Gff3Filter {
    pub fn matches(&self, record: &Gff3Record) -> bool {
        if let Some(seqid) = &self.seqid {
            if &record.seqid != seqid {
                return false;
            }
        }
        self.feature_types.is_empty() || self.feature_types.iter().any(|t| t == &record.feature_type)
    }
}

pub struct Gff3Reader<R> {
    reader: R,
    source: String,
}

impl Gff3Reader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TrackplotError::io(path, e))?;
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: BufRead> Gff3Reader<R> {
    /// `source` names the input in error messages
    pub fn new<S: Into<String>>(reader: R, source: S) -> Self {
        Self {
            reader,
            source: source.into(),
        }
    }

    pub fn read_records(self) -> Result<Vec<Gff3Record>> {
        let mut records = Vec::new();
        for (index, line) in self.reader.lines().enumerate() {
            let line = line.map_err(|e| TrackplotError::io(&self.source, e))?;
            let line = line.trim_end();

            // Embedded sequence section ends the annotations
            if line.starts_with("##FASTA") {
                break;
            }
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            records.push(parse_line(line, &self.source, index + 1)?);
        }
        Ok(records)
    }
}

pub fn parse_line(line: &str, source: &str, line_number: usize) -> Result<Gff3Record> {
    let fail = |message: String| TrackplotError::parse(source, format!("line {}: {}", line_number, message));

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 9 {
        return Err(fail(format!("expected 9 tab-separated fields, found {}", fields.len())));
    }

    let start: Position = fields[3]
        .parse()
        .map_err(|_| fail(format!("invalid start '{}'", fields[3])))?;
    let end: Position = fields[4]
        .parse()
        .map_err(|_| fail(format!("invalid end '{}'", fields[4])))?;
    if end < start {
        return Err(fail(format!("end {} is before start {}", end, start)));
    }

    let score = match fields[5] {
        "." => None,
        s => Some(s.parse().map_err(|_| fail(format!("invalid score '{}'", s)))?),
    };

    let strand = Strand::from_symbol(fields[6])
        .ok_or_else(|| fail(format!("invalid strand '{}'", fields[6])))?;

    let phase = match fields[7] {
        "." => None,
        s => Some(s.parse().map_err(|_| fail(format!("invalid phase '{}'", s)))?),
    };

    Ok(Gff3Record {
        seqid: fields[0].to_string(),
        source: fields[1].to_string(),
        feature_type: fields[2].to_string(),
        start,
        end,
        score,
        strand,
        phase,
        attributes: parse_attributes(fields[8]).map_err(fail)?,
    })
}

/// Split `key=value` pairs on `;` and percent-decode the values
fn parse_attributes(column: &str) -> std::result::Result<HashMap<String, String>, String> {
    let mut attributes = HashMap::new();
    for pair in column.split(';') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        if let Some((key, value)) = pair.split_once('=') {
            let value = urlencoding::decode(value.trim())
                .map_err(|e| format!("attribute '{}' is not valid UTF-8 once decoded: {}", key.trim(), e))?;
            attributes.insert(key.trim().to_string(), value.into_owned());
        }
    }
    Ok(attributes)
}

/// Convert records passing `filter` into features, in file order.
pub fn features_from_records(
    records: &[Gff3Record],
    filter: &Gff3Filter,
    group_by_parent: bool,
) -> Vec<Feature> {
    let kept = records.iter().filter(|r| filter.matches(r));
    if !group_by_parent {
        return kept.map(Gff3Record::to_feature).collect();
    }

    // Parents may themselves be filtered out (e.g. keeping only exons), so look them up
    // in the full record list for naming.
    let by_id: HashMap<&str, &Gff3Record> =
        records.iter().filter_map(|r| r.id().map(|id| (id, r))).collect();

    let mut features: Vec<Feature> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut group_segments: Vec<Vec<Segment>> = Vec::new();

    for record in kept {
        let parents = record.parents();
        if parents.is_empty() {
            features.push(record.to_feature());
            group_segments.push(Vec::new());
            continue;
        }
        for parent in parents {
            let index = *group_index.entry(parent.to_string()).or_insert_with(|| {
                let mut feature = match by_id.get(parent) {
                    Some(parent_record) => parent_record.to_feature(),
                    None => Feature::new(parent, record.start, record.end),
                };
                feature.start = record.start;
                feature.stop = record.end;
                if feature.strand.is_none() {
                    feature.strand = record.strand;
                }
                features.push(feature);
                group_segments.push(Vec::new());
                features.len() - 1
            });
            group_segments[index].push(Segment::new(record.start, record.end));
        }
    }

    for (feature, segments) in features.iter_mut().zip(group_segments) {
        if !segments.is_empty() {
            feature.set_segments(segments);
        }
    }
    features
}
