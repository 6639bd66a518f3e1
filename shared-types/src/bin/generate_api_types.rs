use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Project types
    types.push(clean_type(Category::export_to_string()?));
    types.push(clean_type(Project::export_to_string()?));
    types.push(clean_type(ProjectDraft::export_to_string()?));
    types.push(clean_type(ProjectsResponse::export_to_string()?));
    types.push(clean_type(SubmitResponse::export_to_string()?));

    // Gallery types
    types.push(clean_type(CategoryFilter::export_to_string()?));
    types.push(clean_type(LoadStatus::export_to_string()?));
    types.push(clean_type(Media::export_to_string()?));
    types.push(clean_type(ProjectLinks::export_to_string()?));
    types.push(clean_type(GalleryCard::export_to_string()?));
    types.push(clean_type(GalleryPage::export_to_string()?));
    types.push(clean_type(SubmitProjectResponse::export_to_string()?));
    types.push(clean_type(ValidationErrorResponse::export_to_string()?));
    types.push(clean_type(FieldError::export_to_string()?));

    // Community types
    types.push(clean_type(CommunityPost::export_to_string()?));
    types.push(clean_type(CommunityResponse::export_to_string()?));

    let output_dir = Path::new("../gui/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Every type lands in the same file, so cross-type imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
