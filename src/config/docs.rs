//! Config field documentation, used by `tgalign config show` to annotate
//! the TOML output with inline comments.

use std::collections::HashMap;

/// Documentation for a config section.
pub struct SectionDoc {
    /// TOML section name (e.g., "alignment", "merge")
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldDoc],
}

/// Documentation for a config field.
pub struct FieldDoc {
    /// Field name as it appears in TOML
    pub name: &'static str,
    pub description: &'static str,
    /// Default value as a display string
    pub default_display: &'static str,
}

/// Config sections in canonical display order.
pub const CONFIG_SECTIONS: &[SectionDoc] = &[
    SectionDoc {
        name: "alignment",
        description: "Matching transcript lines against word intervals",
        fields: &[
            FieldDoc {
                name: "word_tier",
                description: "Word tier, by zero-based index or by name",
                default_display: "0",
            },
            FieldDoc {
                name: "low_confidence",
                description: "Report matches whose peak similarity is below this",
                default_display: "0.6",
            },
            FieldDoc {
                name: "min_line_gap",
                description: "Report lines starting closer than this (seconds) to the previous one",
                default_display: "0.5",
            },
            FieldDoc {
                name: "max_line_span",
                description: "Report lines longer than this (seconds)",
                default_display: "10.0",
            },
            FieldDoc {
                name: "min_similarity",
                description: "Discard accumulated words scoring below this",
                default_display: "0.01",
            },
            FieldDoc {
                name: "sentinel",
                description: "Text of the segment appended after the last word",
                default_display: "\"++\"",
            },
        ],
    },
    SectionDoc {
        name: "merge",
        description: "Folding aligned lines into clips",
        fields: &[
            FieldDoc {
                name: "max_span",
                description: "Longest merged block (seconds)",
                default_display: "28.0",
            },
            FieldDoc {
                name: "min_gap",
                description: "Report blocks starting closer than this (seconds) to the previous one",
                default_display: "0.5",
            },
            FieldDoc {
                name: "connector",
                description: "Inserted between joined lines ending in a script character",
                default_display: "\"、\"",
            },
        ],
    },
    SectionDoc {
        name: "validation",
        description: "Checking aligned files before cutting",
        fields: &[
            FieldDoc {
                name: "max_span",
                description: "Drop entries longer than this (seconds)",
                default_display: "29.6",
            },
            FieldDoc {
                name: "numbering",
                description: "\"source\" keeps input line numbers, \"contiguous\" renumbers 1..n",
                default_display: "\"source\"",
            },
        ],
    },
    SectionDoc {
        name: "split",
        description: "Cutting audio with ffmpeg",
        fields: &[
            FieldDoc {
                name: "ffmpeg",
                description: "ffmpeg executable",
                default_display: "\"ffmpeg\"",
            },
            FieldDoc {
                name: "loglevel",
                description: "ffmpeg -loglevel value",
                default_display: "\"warning\"",
            },
            FieldDoc {
                name: "group_pattern",
                description: "Audio stem prefix naming the clip directory",
                default_display: "\"^RJ\\\\d+\"",
            },
        ],
    },
    SectionDoc {
        name: "files",
        description: "Derived file names",
        fields: &[
            FieldDoc {
                name: "transcript_extension",
                description: "Extension of the transcript next to each TextGrid",
                default_display: "\"txt\"",
            },
            FieldDoc {
                name: "lines_suffix",
                description: "Suffix of the per-line output",
                default_display: "\".lines.txt\"",
            },
            FieldDoc {
                name: "aligned_suffix",
                description: "Suffix of the merged output",
                default_display: "\".aligned.txt\"",
            },
            FieldDoc {
                name: "checked_suffix",
                description: "Suffix of the checked output",
                default_display: "\".ok.txt\"",
            },
        ],
    },
];

/// Annotate a serialized TOML config string with inline documentation comments.
///
/// Inserts `# description` comments above each known field.
pub fn annotate_config(toml_str: &str) -> String {
    let mut lookup: HashMap<(&str, &str), &str> = HashMap::new();
    for section in CONFIG_SECTIONS {
        for field in section.fields {
            lookup.insert((section.name, field.name), field.description);
        }
    }

    let mut result = String::new();
    let mut current_section = String::new();

    for line in toml_str.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && !trimmed.starts_with("[[") {
            let name = trimmed
                .trim_start_matches('[')
                .split(']')
                .next()
                .unwrap_or("")
                .trim();
            current_section = name.to_string();
            result.push_str(line);
            result.push('\n');
            continue;
        }

        if let Some((key, _)) = trimmed.split_once('=') {
            if let Some(desc) = lookup.get(&(current_section.as_str(), key.trim())) {
                result.push_str(&format!("# {}\n", desc));
            }
        }

        result.push_str(line);
        result.push('\n');
    }

    result
}
