//! # Persistência — AtomSpace e Padrões em Disco
//!
//! Serializa o [`AtomSpace`] e o [`PatternReport`] como JSON
//! pretty-printed, para facilitar inspeção manual.
//!
//! | Função | Formato |
//! |--------|---------|
//! | [`save_space`] / [`load_space`] | `{atoms: [...], size}` |
//! | [`save_patterns`] / [`load_patterns`] | `{patterns: [...], mining_params: {...}}` |
//!
//! Os índices do AtomSpace não são gravados: [`AtomSpace::import`] os
//! reconstrói ao carregar.
//!
//! ## ⚠️ Atomicidade
//!
//! A escrita **não é atômica**: um crash durante a escrita pode corromper
//! o arquivo.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::{AtomSpace, SharedAtomSpace};
use crate::mining::PatternReport;

/// Salva o AtomSpace compartilhado em `path`.
///
/// Cria o diretório pai se não existir. Segura apenas um read lock
/// durante a serialização.
pub fn save_space(space: &SharedAtomSpace, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let json = {
        let space = space.read();
        serde_json::to_string_pretty(&space.export())
            .context("Falha ao serializar AtomSpace")?
    };
    std::fs::write(path, json)
        .with_context(|| format!("Falha ao escrever {}", path.display()))?;
    tracing::debug!(path = %path.display(), "AtomSpace salvo");
    Ok(())
}

/// Carrega um AtomSpace de `path`, ou cria um vazio se o arquivo não existir.
///
/// # Erros
///
/// Retorna erro se o arquivo existir mas estiver corrompido.
pub fn load_space(path: &Path) -> Result<AtomSpace> {
    let mut space = AtomSpace::new();
    if !path.exists() {
        tracing::info!("Nenhum {} encontrado, iniciando AtomSpace vazio", path.display());
        return Ok(space);
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Falha ao ler {}", path.display()))?;
    space
        .import_json(&json)
        .with_context(|| format!("Falha ao desserializar {}", path.display()))?;
    Ok(space)
}

/// Salva a exportação de padrões em `path`.
pub fn save_patterns(report: &PatternReport, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(report).context("Falha ao serializar padrões")?;
    std::fs::write(path, json)
        .with_context(|| format!("Falha ao escrever {}", path.display()))?;
    tracing::debug!(path = %path.display(), patterns = report.patterns.len(), "Padrões salvos");
    Ok(())
}

/// Carrega uma exportação de padrões de `path`.
pub fn load_patterns(path: &Path) -> Result<PatternReport> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Falha ao ler {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Falha ao desserializar {}", path.display()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Falha ao criar diretório {}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MinerConfig;
    use crate::core::{concept_node, inheritance_link, BeliefValue};
    use crate::mining::PatternMiner;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("atomspace-pln-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_space_round_trip() {
        let shared = AtomSpace::shared();
        {
            let mut space = shared.write();
            let a = space.add(concept_node("A").with_belief(BeliefValue::new(0.8, 0.4))).id.clone();
            let b = space.add(concept_node("B")).id.clone();
            space.add(inheritance_link(&a, &b));
        }
        let path = temp_path("space.json");
        save_space(&shared, &path).unwrap();

        let loaded = load_space(&path).unwrap();
        assert_eq!(loaded.size(), 3);
        let original: Vec<_> = shared.read().iter().cloned().collect();
        let restored: Vec<_> = loaded.iter().cloned().collect();
        assert_eq!(original, restored);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_gives_empty_space() {
        let space = load_space(&temp_path("missing.json")).unwrap();
        assert!(space.is_empty());
    }

    #[test]
    fn test_corrupted_file_is_error() {
        let path = temp_path("broken.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load_space(&path).is_err());
        assert!(load_patterns(&path).is_err());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_patterns_round_trip() {
        let mut space = AtomSpace::new();
        for i in 0..3 {
            space.add(concept_node(&format!("C{}", i)));
        }
        let mut miner = PatternMiner::new(MinerConfig {
            max_pattern_size: 1,
            ..Default::default()
        });
        miner.mine(&space);
        let report = miner.report();

        let path = temp_path("patterns.json");
        save_patterns(&report, &path).unwrap();
        assert_eq!(load_patterns(&path).unwrap(), report);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
