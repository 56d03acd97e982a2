//! Command implementations for the nodc-codes CLI.

use anyhow::{Context, bail};
use encoding_rs::{Encoding, WINDOWS_1252};

use crate::cli::args::*;
use crate::error::CodesError;
use crate::resource::{DirProvider, ResourceProvider, TRANSLATE_CODES};
use crate::table::SynonymTable;

/// Execute a CLI command.
pub fn execute_command(args: CodesArgs) -> anyhow::Result<()> {
    let table = load_table(&args)?;
    match &args.command {
        Command::Resolve(resolve_args) => resolve_code(&table, resolve_args),
        Command::Translate(translate_args) => translate_code(&table, translate_args),
        Command::List(list_args) => list_values(&table, list_args),
        Command::Synonyms(synonyms_args) => list_synonyms(&table, synonyms_args),
        Command::Info(info_args) => show_info(&table, info_args),
        Command::Fields => list_fields(&table),
    }
}

/// Build the reference table from whatever source the global flags select.
fn load_table(args: &CodesArgs) -> anyhow::Result<SynonymTable> {
    let encoding = match &args.encoding {
        Some(label) => Encoding::for_label(label.as_bytes())
            .ok_or_else(|| CodesError::resource(format!("unknown encoding label '{label}'")))?,
        None => WINDOWS_1252,
    };

    if let Some(file) = &args.file {
        return SynonymTable::from_path_with_encoding(file, encoding)
            .with_context(|| format!("failed to read reference table {}", file.display()));
    }

    let provider = match &args.config_dir {
        Some(dir) => DirProvider::new(dir),
        None => DirProvider::discover()?,
    }
    .with_encoding(encoding);

    provider.load_table(TRANSLATE_CODES).with_context(|| {
        format!(
            "failed to load {TRANSLATE_CODES} from {}",
            provider.dir().display()
        )
    })
}

/// Resolve a synonym to its public value.
fn resolve_code(table: &SynonymTable, args: &ResolveArgs) -> anyhow::Result<()> {
    match table.resolve(&args.field, &args.synonym) {
        Some(public_value) => {
            println!("{public_value}");
            Ok(())
        }
        None => bail!(
            "no public value matches '{}' in field '{}'",
            args.synonym,
            args.field
        ),
    }
}

/// Translate a synonym into another column.
fn translate_code(table: &SynonymTable, args: &TranslateArgs) -> anyhow::Result<()> {
    match table.translate(&args.field, &args.synonym, &args.to) {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => bail!(
            "could not translate '{}' in field '{}' to column '{}'",
            args.synonym,
            args.field,
            args.to
        ),
    }
}

/// List the values registered for a field.
fn list_values(table: &SynonymTable, args: &ListArgs) -> anyhow::Result<()> {
    let values = match &args.translate_to {
        Some(column) => table.translated_values(&args.field, column),
        None => table.public_values(&args.field),
    };
    if values.is_empty() {
        bail!("nothing to list for field '{}'", args.field);
    }
    for value in values {
        println!("{value}");
    }
    Ok(())
}

/// List the synonyms registered for a public value.
fn list_synonyms(table: &SynonymTable, args: &SynonymsArgs) -> anyhow::Result<()> {
    let synonyms = table.synonyms(&args.field, &args.public_value);
    if synonyms.is_empty() {
        bail!(
            "no public value '{}' in field '{}'",
            args.public_value,
            args.field
        );
    }
    for synonym in synonyms {
        println!("{synonym}");
    }
    Ok(())
}

/// Show the full row a synonym resolves to.
fn show_info(table: &SynonymTable, args: &InfoArgs) -> anyhow::Result<()> {
    let Some(row) = table.row(&args.field, &args.synonym) else {
        bail!(
            "no public value matches '{}' in field '{}'",
            args.synonym,
            args.field
        );
    };
    match args.format {
        OutputFormat::Text => {
            for column in table.header() {
                println!("{column}\t{}", row.get(column).unwrap_or_default());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(row)?);
        }
    }
    Ok(())
}

/// List the fields present in the reference table.
fn list_fields(table: &SynonymTable) -> anyhow::Result<()> {
    for field in table.fields() {
        println!("{field}");
    }
    Ok(())
}
