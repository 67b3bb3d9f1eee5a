use std::fs;
use std::io;
use std::path::Path;

use clap::{CommandFactory, ValueEnum};
use clap_complete::Shell;

// cli.rs only depends on clap + clap_complete, so it can be compiled here
// without the rest of the crate.
#[path = "src/cli.rs"]
mod cli;

fn main() -> io::Result<()> {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let Some(out_dir) = std::env::var_os("OUT_DIR") else {
        return Ok(());
    };
    let out_dir = Path::new(&out_dir);
    let mut cmd = cli::Cli::command();

    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;
    write_page(cmd.clone(), &man_dir)?;
    // One page per command group; leaf commands live on their group's page.
    for group in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let page = group.clone().name(format!("atelier-{}", group.get_name()));
        write_page(page, &man_dir)?;
    }

    let completion_dir = out_dir.join("completions");
    fs::create_dir_all(&completion_dir)?;
    for shell in Shell::value_variants() {
        clap_complete::generate_to(*shell, &mut cmd, "atelier", &completion_dir)?;
    }
    Ok(())
}

fn write_page(cmd: clap::Command, dir: &Path) -> io::Result<()> {
    let path = dir.join(format!("{}.1", cmd.get_name()));
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd).render(&mut buf)?;
    fs::write(path, buf)
}
