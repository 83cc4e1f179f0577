//! Initialize a documentation directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing swagdoc...");

    scaffold(Path::new("docs"), config_path, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'swagdoc serve' to browse the API documentation.");

    Ok(())
}

/// Write the sample definition and config file, keeping existing files
/// unless `overwrite` is set.
fn scaffold(docs_dir: &Path, config_path: &Path, overwrite: bool) -> Result<()> {
    // Create docs directory
    if docs_dir.exists() {
        if !overwrite {
            tracing::warn!(
                "{} already exists. Use --yes to overwrite.",
                docs_dir.display()
            );
            return Ok(());
        }
    } else {
        fs::create_dir_all(docs_dir).context("Failed to create docs directory")?;
    }

    // Create config file
    if !config_path.exists() || overwrite {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    }

    // Create sample definition
    let definition_path = docs_dir.join("openapi.yaml");
    if !definition_path.exists() || overwrite {
        fs::write(&definition_path, DEFAULT_DEFINITION)
            .context("Failed to write openapi.yaml")?;
        tracing::info!("Created {}", definition_path.display());
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# swagdoc configuration

[server]
host = "127.0.0.1"
port = 8080
open = true

[ui]
title = "API Documentation"
doc_dir = "docs"
path_prefix = "/"

# "list", "full" or "none"
doc_expansion = "list"

# Definitions are discovered in doc_dir when no urls are listed.
# [[ui.urls]]
# name = "Petstore"
# url = "openapi.yaml"

# [ui.oauth]
# client_id = "my-client"
# realm = ""
# app_name = "API Documentation"
"#;

const DEFAULT_DEFINITION: &str = r##"openapi: 3.0.3
info:
  title: Petstore
  version: 1.0.0
  description: Sample definition created by swagdoc init.
paths:
  /pets:
    get:
      summary: List all pets
      operationId: listPets
      responses:
        "200":
          description: A list of pets
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: "#/components/schemas/Pet"
  /pets/{petId}:
    get:
      summary: Get a pet by id
      operationId: showPetById
      parameters:
        - name: petId
          in: path
          required: true
          schema:
            type: string
      responses:
        "200":
          description: The requested pet
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Pet"
        "404":
          description: Pet not found
components:
  schemas:
    Pet:
      type: object
      required:
        - id
        - name
      properties:
        id:
          type: integer
          format: int64
        name:
          type: string
        tag:
          type: string
"##;
