use clap::{Parser, Subcommand};
use e2s_core::{AmenityService, CoreConfig, MutationOutcome};
use e2s_taxonomy::{Catalog, MainCategory, SubKey, Suggestions};
use e2s_wire::{Profile, ProfileWire};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "e2s")]
#[command(about = "E2S establishment amenity engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Organise a profile's amenity lists into the category scheme
    Organize {
        /// Profile JSON file
        file: PathBuf,
    },
    /// Add an amenity to a profile
    Add {
        /// Profile JSON file
        file: PathBuf,
        /// Sub-category key, e.g. parking
        sub_category: String,
        /// Amenity text
        text: String,
        /// Main category cross-check (optional)
        #[arg(long)]
        main_category: Option<String>,
    },
    /// Rewrite an existing amenity
    Edit {
        /// Profile JSON file
        file: PathBuf,
        /// Sub-category key the amenity is filed under
        sub_category: String,
        /// Current label
        old_label: String,
        /// Replacement text
        new_text: String,
    },
    /// Remove an amenity
    Remove {
        /// Profile JSON file
        file: PathBuf,
        /// Sub-category key the amenity is filed under
        sub_category: String,
        /// Label to remove
        label: String,
    },
    /// Suggest amenities the profile does not have yet
    Suggest {
        /// Profile JSON file
        file: PathBuf,
        /// Establishment kind override (defaults to the profile's type)
        #[arg(long)]
        kind: Option<String>,
    },
    /// Print the active taxonomy catalogue as YAML
    ExportTaxonomy,
    /// Print the active suggestion tables as YAML
    ExportSuggestions,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let taxonomy_file = std::env::var("E2S_TAXONOMY_FILE").ok().map(PathBuf::from);
    let suggestions_file = std::env::var("E2S_SUGGESTIONS_FILE").ok().map(PathBuf::from);
    let config = CoreConfig::resolve(taxonomy_file, suggestions_file)?;
    let service = AmenityService::new(config);

    match cli.command {
        Some(Commands::Organize { file }) => {
            let profile = load_profile(&file)?;
            let view = service.organize(&profile);
            for section in view.sections() {
                println!("{} {}", section.icon, section.title);
                for sub in &section.subs {
                    if sub.labels.is_empty() {
                        continue;
                    }
                    println!("  {} {}", sub.icon, sub.title);
                    for label in &sub.labels {
                        println!("    - {}", label);
                    }
                }
            }
        }
        Some(Commands::Add {
            file,
            sub_category,
            text,
            main_category,
        }) => {
            let sub = SubKey::new(&sub_category)?;
            if let Some(main) = main_category {
                check_main_category(&service, &sub, &main)?;
            }
            let mut profile = load_profile(&file)?;
            let outcome = service.add(&mut profile, &sub, &text);
            finish_mutation(&file, &profile, outcome)?;
        }
        Some(Commands::Edit {
            file,
            sub_category,
            old_label,
            new_text,
        }) => {
            let sub = SubKey::new(&sub_category)?;
            let mut profile = load_profile(&file)?;
            let outcome = service.edit(&mut profile, &sub, &old_label, &new_text);
            finish_mutation(&file, &profile, outcome)?;
        }
        Some(Commands::Remove {
            file,
            sub_category,
            label,
        }) => {
            let sub = SubKey::new(&sub_category)?;
            let mut profile = load_profile(&file)?;
            let outcome = service.remove(&mut profile, &sub, &label);
            finish_mutation(&file, &profile, outcome)?;
        }
        Some(Commands::Suggest { file, kind }) => {
            let profile = load_profile(&file)?;
            let suggestions = service.suggest(&profile, kind.as_deref());
            if suggestions.is_empty() {
                println!("No suggestions.");
            } else {
                for suggestion in suggestions {
                    println!(
                        "{} ({} / {})",
                        suggestion.label, suggestion.main, suggestion.sub
                    );
                }
            }
        }
        Some(Commands::ExportTaxonomy) => {
            print!("{}", Catalog::render(service.config().taxonomy())?);
        }
        Some(Commands::ExportSuggestions) => {
            print!("{}", Suggestions::render(service.config().suggestions())?);
        }
        None => {
            println!("Use 'e2s --help' for commands");
        }
    }

    Ok(())
}

fn load_profile(path: &Path) -> Result<ProfileWire, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(Profile::parse(&text)?)
}

/// Reject a main category that does not match the sub-category's rubric.
fn check_main_category(
    service: &AmenityService,
    sub: &SubKey,
    main: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let category = MainCategory::from_key(main)
        .ok_or_else(|| format!("unknown main category '{}'", main))?;
    if let Some(placement) = service.config().taxonomy().placement_of(sub) {
        if placement.main != category {
            return Err(format!(
                "sub-category '{}' belongs to '{}', not '{}'",
                sub, placement.main, category
            )
            .into());
        }
    }
    Ok(())
}

/// Report the outcome and write the profile back when it changed.
fn finish_mutation(
    path: &Path,
    profile: &ProfileWire,
    outcome: MutationOutcome,
) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        MutationOutcome::Applied(record) => {
            std::fs::write(path, Profile::render(profile)?)?;
            println!("Applied: {} ({})", record.text, record.sub());
        }
        MutationOutcome::Removed(record) => {
            std::fs::write(path, Profile::render(profile)?)?;
            println!("Removed: {} ({})", record.text, record.sub());
        }
        MutationOutcome::NotFound => {
            eprintln!("No matching amenity found; profile unchanged");
        }
        MutationOutcome::EmptyText => {
            eprintln!("Text is empty once sanitised; profile unchanged");
        }
        MutationOutcome::UnknownSubCategory(sub) => {
            eprintln!("Unknown sub-category '{}'; profile unchanged", sub);
        }
    }
    Ok(())
}
