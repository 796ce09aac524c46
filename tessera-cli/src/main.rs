//! Command line tools for Tessera scene archives

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use tessera_io::{read_mesh, read_scene, workspace_from_mesh, write_scene, ImportOptions, SceneImport};

#[derive(Parser)]
#[command(name = "tessera", version, about = "Inspect and produce .t3d scene archives")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import a scene archive and print a summary
    Inspect {
        /// Path to a .t3d file
        file: PathBuf,
    },
    /// Convert a Wavefront OBJ mesh into a single-object scene archive
    Obj2t3d {
        /// Path to a .obj file
        input: PathBuf,
        /// Output .t3d path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_summary(import: &SceneImport) {
    let workspace = &import.workspace;
    let metadata = &workspace.metadata;

    println!("version:      {}", metadata.version);
    println!(
        "application:  {} {}",
        metadata.application.name, metadata.application.version
    );
    println!("created:      {}", metadata.created);
    println!("modified:     {}", metadata.modified);
    if let Some(author) = &metadata.author {
        println!("author:       {}", author);
    }
    println!("meshes:       {}", workspace.meshes.len());
    for mesh in &workspace.meshes {
        println!(
            "  {} ({}): {} vertices, {} edges, {} faces",
            mesh.id,
            mesh.name,
            mesh.vertex_count(),
            mesh.edge_count(),
            mesh.face_count()
        );
    }
    println!("materials:    {}", workspace.materials.len());
    println!(
        "objects:      {} ({} root)",
        workspace.objects.len(),
        workspace.root_objects.len()
    );
    match &workspace.lights {
        Some(lights) => println!("lights:       {}", lights.len()),
        None => println!("lights:       none"),
    }
    match &workspace.cameras {
        Some(cameras) => println!("cameras:      {}", cameras.len()),
        None => println!("cameras:      none"),
    }

    let animation = &import.animation;
    println!("clips:        {}", animation.clips.len());
    for clip in &animation.clips {
        let active = animation.active_clip_id.as_deref() == Some(clip.id.as_str());
        println!(
            "  {}{} [{} - {}], {} tracks",
            clip.name,
            if active { " (active)" } else { "" },
            clip.start,
            clip.end,
            clip.track_ids.len()
        );
    }

    if import.has_warnings() {
        println!("warnings:     {}", import.warnings.len());
        for warning in &import.warnings {
            println!("  {}", warning);
        }
    }
}

fn inspect(file: &Path) -> Result<()> {
    let import = read_scene(file).with_context(|| format!("failed to read {}", file.display()))?;
    print_summary(&import);
    Ok(())
}

fn obj_to_t3d(input: &Path, output: &Path) -> Result<()> {
    let mesh = read_mesh(input).with_context(|| format!("failed to read {}", input.display()))?;
    info!(
        "read mesh '{}' with {} vertices and {} faces",
        mesh.name,
        mesh.vertex_count(),
        mesh.face_count()
    );

    let workspace = workspace_from_mesh(mesh, &ImportOptions::default());

    write_scene(&workspace, None, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Inspect { file } => inspect(file),
        Command::Obj2t3d { input, output } => obj_to_t3d(input, output),
    }
}
