//! Ant command - evolve an artificial ant controller.

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use treegp::ant::{AntConfig, Trail, run_demo};

use super::output::{format_json, format_text};
use super::{CliError, OutputFormat};

/// Arguments of the `ant` command.
#[derive(Debug)]
pub(crate) struct AntArgs {
    pub(crate) population: Option<usize>,
    pub(crate) generations: Option<usize>,
    pub(crate) seed: Option<u64>,
    pub(crate) moves: Option<usize>,
    pub(crate) trail: Option<PathBuf>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) format: OutputFormat,
}

/// Execute the ant command.
pub(crate) fn execute(args: &AntArgs) -> Result<(), CliError> {
    let config = resolve_config(args)?;

    let trail = match &args.trail {
        Some(path) => Trail::load(path)?,
        None => Trail::santa_fe()?,
    };

    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(42)
    });
    info!(
        seed,
        population = config.population,
        generations = config.evolution.generations,
        moves = config.moves,
        "starting ant evolution"
    );

    let mut rng = SmallRng::seed_from_u64(seed);
    let report = run_demo(&config, trail, &mut rng)?;

    match args.format {
        OutputFormat::Text => print!("{}", format_text(&report, seed)),
        OutputFormat::Json => println!("{}", format_json(&report, seed)?),
    }

    Ok(())
}

/// Config file contents (or defaults) with command-line overrides applied.
fn resolve_config(args: &AntArgs) -> Result<AntConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AntConfig::default(),
    };

    if let Some(population) = args.population {
        config.population = population;
    }
    if let Some(generations) = args.generations {
        config.evolution.generations = generations;
    }
    if let Some(moves) = args.moves {
        config.moves = moves;
    }

    Ok(config)
}

fn load_config(path: &Path) -> Result<AntConfig, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ConfigParse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(config: Option<PathBuf>) -> AntArgs {
        AntArgs {
            population: None,
            generations: None,
            seed: Some(1),
            moves: None,
            trail: None,
            config,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn test_defaults_without_config() {
        let config = resolve_config(&args(None)).unwrap();
        assert_eq!(config, AntConfig::default());
    }

    #[test]
    fn test_config_file_and_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"moves": 400, "evolution": {"generations": 12, "tournament_size": 3}}"#)
            .unwrap();

        let mut args = args(Some(file.path().to_path_buf()));
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.moves, 400);
        assert_eq!(config.evolution.generations, 12);
        assert_eq!(config.evolution.tournament_size, 3);
        assert!(config.evolution.selection_size.is_none());
        assert_eq!(config.population, AntConfig::default().population);

        args.moves = Some(50);
        args.population = Some(10);
        let config = resolve_config(&args).unwrap();
        assert_eq!((config.moves, config.population), (50, 10));
    }

    #[test]
    fn test_bad_config_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        let err = resolve_config(&args(Some(file.path().to_path_buf()))).unwrap_err();
        assert!(matches!(err, CliError::ConfigParse { .. }));

        let err = resolve_config(&args(Some(PathBuf::from("/nonexistent/config.json")))).unwrap_err();
        assert!(matches!(err, CliError::ConfigRead { .. }));
    }
}
