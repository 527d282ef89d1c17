mod cli;
mod config;
mod files;

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use lexigraph_core::eval::{EvalOutcome, Evaluator};
use lexigraph_core::graph::TranslationGraph;
use lexigraph_core::io::{config as config_io, preview};
use lexigraph_core::score::{metric, select, SelectionPolicy};
use lexigraph_core::search::candidates;
use log::LevelFilter;
use tabled::{Table, Tabled};

#[macro_use]
extern crate log;

fn main() -> Result<()> {
    let cli = cli::Args::parse();

    let log_level = if cli.verbose == 0 {
        LevelFilter::Info
    } else if cli.verbose == 1 {
        LevelFilter::Debug
    } else {
        LevelFilter::Trace
    };
    if !cli.quiet {
        Builder::new().filter_level(log_level).init();
    }

    let run_config = config::load(cli.config.as_deref())?;

    let out_data: String = match cli.command.clone() {
        cli::Commands::Recommend { lang1, lang2, stats } => {
            let stats_path = stats.map(Into::into).unwrap_or_else(files::default_stats_path);
            let meta_graph = files::load_meta_graph(&stats_path)?;
            let recommendations = lexigraph_core::langgraph::recommend(&meta_graph, &lang1, &lang2);
            info!("{} candidate languages recommended for {}-{}", recommendations.len(), lang1, lang2);

            let config_path = files::default_config_path(&lang1, &lang2);
            config_io::write(&config_path, &recommendations)?;
            format!("wrote {} recommendations to {}", recommendations.len(), config_path.display())
        }

        cli::Commands::Build {
            lang1,
            lang2,
            monodix_dir,
            parsed_dir,
            languages,
        } => {
            let monodix_dir = monodix_dir.map(Into::into).unwrap_or_else(files::default_monodix_dir);
            let parsed_dir = parsed_dir.map(Into::into).unwrap_or_else(files::default_parsed_dir);
            let n = languages.unwrap_or(run_config.languages);

            let config_path = files::default_config_path(&lang1, &lang2);
            let shortlist = files::shortlisted_languages(&config_path, &lang1, &lang2, n)
                .context("run the `recommend` subcommand first to produce this file")?;
            debug!("building translation graph over {} languages", shortlist.len());

            let (graph, report) = files::build_translation_graph(&monodix_dir, &parsed_dir, &shortlist)?;
            if report.missing_pairs > 0 {
                warn!("{} language pairs had no edge-list file and were skipped", report.missing_pairs);
            }
            if report.malformed_lines > 0 || report.dropped_records > 0 {
                warn!(
                    "{} malformed lines and {} unresolvable records skipped while building the graph",
                    report.malformed_lines, report.dropped_records
                );
            }

            #[derive(Tabled)]
            struct GraphRow {
                languages: usize,
                nodes: usize,
                edges: usize,
                missing_pairs: usize,
            }
            Table::new(vec![GraphRow {
                languages: shortlist.len(),
                nodes: graph.node_count(),
                edges: graph.edge_count(),
                missing_pairs: report.missing_pairs,
            }])
            .to_string()
        }

        cli::Commands::Eval {
            lang1,
            lang2,
            monodix_dir,
            parsed_dir,
            languages,
            cutoff,
            topn,
            seed,
            n_iter,
        } => {
            let monodix_dir = monodix_dir.map(Into::into).unwrap_or_else(files::default_monodix_dir);
            let parsed_dir = parsed_dir.map(Into::into).unwrap_or_else(files::default_parsed_dir);
            let n = languages.unwrap_or(run_config.languages);
            let cutoff = cutoff.unwrap_or(run_config.cutoff);
            let topn = topn.or(run_config.topn);
            let seed = seed.unwrap_or(run_config.seed);
            let n_iter = n_iter.unwrap_or(run_config.n_iter);

            let config_path = files::default_config_path(&lang1, &lang2);
            let shortlist = files::shortlisted_languages(&config_path, &lang1, &lang2, n)
                .context("run the `recommend` subcommand first to produce this file")?;

            let (l1_lexicon, _) = files::load_lexicon(&monodix_dir, &lang1)?;
            let l1_entries: Vec<_> = l1_lexicon.words().cloned().collect();

            let monodix_dir_for_rebuild = monodix_dir.clone();
            let parsed_dir_for_rebuild = parsed_dir.clone();
            let shortlist_for_rebuild = shortlist.clone();
            let build_graph = move || -> TranslationGraph {
                files::build_translation_graph(&monodix_dir_for_rebuild, &parsed_dir_for_rebuild, &shortlist_for_rebuild)
                    .map(|(g, _)| g)
                    .unwrap_or_default()
            };

            let mut evaluator = Evaluator::new(seed);
            let outcomes = evaluator.evaluate(build_graph, &l1_entries, &lang1, &lang2, cutoff, topn, n_iter);

            #[derive(Tabled)]
            struct EvalRow {
                iteration: u32,
                outcome: String,
                precision: String,
                recall: String,
                f1: String,
                sample_size: String,
            }
            let rows: Vec<EvalRow> = outcomes
                .iter()
                .enumerate()
                .map(|(i, outcome)| match outcome {
                    EvalOutcome::Report(report) => EvalRow {
                        iteration: i as u32,
                        outcome: "ok".to_string(),
                        precision: format!("{:.3}", report.precision),
                        recall: format!("{:.3}", report.recall),
                        f1: format!("{:.3}", report.f1),
                        sample_size: report.sample_size.to_string(),
                    },
                    EvalOutcome::EmptySample => EvalRow {
                        iteration: i as u32,
                        outcome: "empty-sample".to_string(),
                        precision: "-".to_string(),
                        recall: "-".to_string(),
                        f1: "-".to_string(),
                        sample_size: "0".to_string(),
                    },
                    EvalOutcome::DegenerateMetrics => EvalRow {
                        iteration: i as u32,
                        outcome: "degenerate-metrics".to_string(),
                        precision: "-".to_string(),
                        recall: "-".to_string(),
                        f1: "-".to_string(),
                        sample_size: "-".to_string(),
                    },
                })
                .collect();
            Table::new(rows).to_string()
        }

        cli::Commands::Preview {
            lang1,
            lang2,
            monodix_dir,
            parsed_dir,
            languages,
            cutoff,
            topn,
        } => {
            let monodix_dir = monodix_dir.map(Into::into).unwrap_or_else(files::default_monodix_dir);
            let parsed_dir = parsed_dir.map(Into::into).unwrap_or_else(files::default_parsed_dir);
            let n = languages.unwrap_or(run_config.languages);

            // Preview scoring is hard-coded to cutoff 4 regardless of the
            // configured value (spec.md §9 Open Question (b); DESIGN.md keeps
            // this as literal original behavior rather than silently guessing
            // it was a bug). `--cutoff`/`run.toml` still accepted so the flag
            // isn't rejected outright, but it has no effect here; warn if set.
            const PREVIEW_CUTOFF: u32 = 4;
            let requested_cutoff = cutoff.unwrap_or(run_config.cutoff);
            if requested_cutoff != PREVIEW_CUTOFF {
                warn!(
                    "preview always scores with cutoff {}, ignoring requested cutoff {}",
                    PREVIEW_CUTOFF, requested_cutoff
                );
            }
            let cutoff = PREVIEW_CUTOFF;
            let policy = match topn.or(run_config.topn) {
                Some(n) => SelectionPolicy::TopN(n),
                None => SelectionPolicy::Auto,
            };

            let config_path = files::default_config_path(&lang1, &lang2);
            let shortlist = files::shortlisted_languages(&config_path, &lang1, &lang2, n)
                .context("run the `recommend` subcommand first to produce this file")?;
            let (graph, _) = files::build_translation_graph(&monodix_dir, &parsed_dir, &shortlist)?;

            let (l1_lexicon, _) = files::load_lexicon(&monodix_dir, &lang1)?;
            let (l2_lexicon, _) = files::load_lexicon(&monodix_dir, &lang2)?;

            // Mirrors `get_translations`: a word only enters the candidate
            // search if it has no existing direct neighbor in the other
            // language already (this pass proposes *new* translations, not
            // restatements of known ones). Each direction's score is
            // whatever that direction's own independent search+selection
            // produced for the pair, defaulting to 0 if that direction
            // never surfaced it — NOT a symmetric re-score of the other
            // side's result, which is what `get_translations` does too
            // (`RESULT[(i, j[0])] = [j[1], 0]`, only overwritten by the
            // second pass when the same pair is independently found).
            let mut result: HashMap<(lexigraph_core::word::Word, lexigraph_core::word::Word), (f64, f64)> = HashMap::new();

            for left in l1_lexicon.words() {
                if let Some(idx) = graph.index_of(left) {
                    if graph.out_neighbors(idx).any(|n| graph.word_at(n).lang == lang2) {
                        continue;
                    }
                }
                let found = candidates(&graph, left, &lang2, Some(cutoff)).unwrap_or_default();
                let scored: Vec<_> = found.into_iter().map(|c| (c.clone(), metric(&graph, left, &c, cutoff))).collect();
                for (right, score_lr) in select(scored, policy, cutoff) {
                    result.entry((left.clone(), right)).or_insert((0.0, 0.0)).0 = score_lr;
                }
            }
            for right in l2_lexicon.words() {
                if let Some(idx) = graph.index_of(right) {
                    if graph.out_neighbors(idx).any(|n| graph.word_at(n).lang == lang1) {
                        continue;
                    }
                }
                let found = candidates(&graph, right, &lang1, Some(cutoff)).unwrap_or_default();
                let scored: Vec<_> = found.into_iter().map(|c| (c.clone(), metric(&graph, right, &c, cutoff))).collect();
                for (left, score_rl) in select(scored, policy, cutoff) {
                    result.entry((left, right.clone())).or_insert((0.0, 0.0)).1 = score_rl;
                }
            }

            let mut entries: Vec<preview::PreviewEntry> = result
                .into_iter()
                .map(|((left, right), (score_lr, score_rl))| preview::PreviewEntry {
                    left,
                    right,
                    score_lr,
                    score_rl,
                })
                .collect();
            entries.sort_by(|a, b| {
                (&a.left.lang, &a.left.lemma, &a.right.lang, &a.right.lemma)
                    .cmp(&(&b.left.lang, &b.left.lemma, &b.right.lang, &b.right.lemma))
            });

            let preview_path = format!("{lang1}-{lang2}-preview");
            preview::write(&preview_path, &entries)?;
            format!("wrote {} candidate pairs to {}", entries.len(), preview_path)
        }
    };

    if let Some(out_path) = cli.output {
        let mut out_file = File::create(out_path)?;
        write!(out_file, "{}", out_data)?;
    } else if !out_data.is_empty() {
        println!("{}", out_data);
    }

    Ok(())
}
