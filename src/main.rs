//! Command-line interface for yanglite

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use yanglite::{
    validate_with_context, DocumentNode, Limits, Schema, SchemaNode, ValidationContext,
};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "yanglite")]
#[command(author, version, about = "YANG-subset schema validation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate an XML instance document against a schema
    Validate {
        /// Path to the JSON schema file
        #[arg(short, long, value_name = "SCHEMA")]
        schema: PathBuf,

        /// Path to the XML file to validate
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Maximum nesting depth for schema and document trees
        #[arg(long, value_name = "DEPTH")]
        max_depth: Option<usize>,

        /// Output the report as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Inspect a schema and display its node tree
    Inspect {
        /// Path to the JSON schema file
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate {
            schema,
            file,
            max_depth,
            json,
        } => cmd_validate(schema, file, max_depth, json),
        Commands::Inspect { schema, json } => cmd_inspect(schema, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn cmd_validate(
    schema_path: PathBuf,
    file: PathBuf,
    max_depth: Option<usize>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut limits = Limits::default();
    if let Some(depth) = max_depth {
        limits = limits.with_max_depth(depth);
    }

    let schema = Schema::from_json_file(&schema_path, &limits)?;
    let doc = DocumentNode::from_xml_file(&file, &limits)?;

    let context = ValidationContext::new().with_max_depth(limits.max_depth);
    let report = validate_with_context(&schema, &doc, context);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_valid() {
        println!("✓ Document is valid");
    } else {
        println!("✗ Document is invalid");
        println!();
        println!("Errors:");
        for diagnostic in report.diagnostics() {
            println!("  - {}", diagnostic);
        }
    }

    if report.is_valid() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn cmd_inspect(schema_path: PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let schema = Schema::from_json_file(&schema_path, &Limits::default())?;

    if json {
        let nodes: Vec<serde_json::Value> = schema.roots().map(node_to_json).collect();
        let output = serde_json::json!({
            "name": schema.name(),
            "version": schema.version(),
            "nodes": nodes,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("yanglite v{}", yanglite::VERSION);
        println!();
        println!("Schema: {} (version {})", schema.name(), schema.version());
        println!("Top-level nodes: {}", schema.root_count());
        println!();
        for node in schema.roots() {
            print_node(node, 0);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_node(node: &SchemaNode, indent: usize) {
    let pad = "  ".repeat(indent);

    let mut line = format!("{}{} {}", pad, node.kind(), node.name());
    if let Some(vt) = node.value_type() {
        line.push_str(&format!(" : {}", vt));
    }
    line.push_str(&format!(" ({})", node.cardinality()));
    if let Some(key) = node.key() {
        line.push_str(&format!(" key={}", key));
    }
    println!("{}", line);

    for child in node.children() {
        print_node(child, indent + 1);
    }
}

#[cfg(feature = "cli")]
fn node_to_json(node: &SchemaNode) -> serde_json::Value {
    let children: Vec<serde_json::Value> = node.children().iter().map(node_to_json).collect();

    let mut object = serde_json::json!({
        "name": node.name(),
        "kind": node.kind().as_str(),
        "cardinality": node.cardinality().as_str(),
    });

    if let Some(vt) = node.value_type() {
        object["type"] = serde_json::json!(vt.name());
        if let yanglite::ValueType::Enumeration(values) = vt {
            object["values"] = serde_json::json!(values);
        }
    }
    if let Some(key) = node.key() {
        object["key"] = serde_json::json!(key);
    }
    if !children.is_empty() {
        object["children"] = serde_json::Value::Array(children);
    }

    object
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
