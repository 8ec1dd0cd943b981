use std::path::PathBuf;

use anyhow::{bail, Result};
use auxkit_lib::reflect::comments_from_json;
use auxkit_lib::{
    enum_comment_to_pair_array, enum_to_output, find_enum_comment, find_enum_value, CommentMap,
    EnumDescriptor, EnumValue,
};
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use crate::commands::read_json;
use crate::output::{print_enum_output, print_json, print_pairs, OutputFormat};

#[derive(Args)]
pub struct EnumsArgs {
    /// JSON file of the form {"enum": {...}, "comments": {...}}, or - for stdin
    pub input: PathBuf,

    /// Print comments as label/value pairs instead of the derived tables
    #[arg(long)]
    pub pairs: bool,

    /// Look up one member by name (or by stringified value) and its comment
    #[arg(long, conflicts_with = "pairs")]
    pub find: Option<String>,
}

/// Result of `--find`.
#[derive(Serialize, Debug, PartialEq)]
pub struct MemberLookup {
    pub key: String,
    pub value: EnumValue,
    pub comment: Option<String>,
}

/// Splits an input document into its descriptor and comment map. A missing
/// `comments` member is an empty map.
pub fn parse_document(document: &Value) -> Result<(EnumDescriptor, CommentMap)> {
    let Some(object) = document.as_object() else {
        bail!("enum input must be a JSON object with an \"enum\" member");
    };
    let Some(definition) = object.get("enum") else {
        bail!("enum input is missing the \"enum\" member");
    };
    let desc = EnumDescriptor::from_json(definition)?;
    let comments = match object.get("comments") {
        Some(raw) => comments_from_json(raw)?,
        None => CommentMap::new(),
    };
    Ok((desc, comments))
}

/// Resolves `key` to its member value, then that value to its comment.
/// An unknown key is an error.
pub fn lookup(desc: &EnumDescriptor, comments: &CommentMap, key: &str) -> Result<MemberLookup> {
    let Some(value) = find_enum_value(desc, key).cloned() else {
        bail!("no enum member named '{}'", key);
    };
    let comment = find_enum_comment(&value, comments).map(str::to_string);
    Ok(MemberLookup {
        key: key.to_string(),
        value,
        comment,
    })
}

pub fn run(args: &EnumsArgs, format: &OutputFormat) -> Result<()> {
    let document = read_json(&args.input)?;
    let (desc, comments) = parse_document(&document)?;
    tracing::debug!(
        "enum with {} entries, {} comments",
        desc.len(),
        comments.len()
    );

    if let Some(ref key) = args.find {
        let found = lookup(&desc, &comments, key)?;
        match (format, &found.comment) {
            (OutputFormat::Json, _) => print_json(&found),
            (_, Some(comment)) => println!("{} = {} ({})", found.key, found.value, comment),
            (_, None) => println!("{} = {}", found.key, found.value),
        }
        return Ok(());
    }

    if args.pairs {
        print_pairs(&enum_comment_to_pair_array(&comments), format)?;
    } else {
        print_enum_output(&enum_to_output(&desc, &comments), format)?;
    }
    Ok(())
}
