use clap::Parser;

#[derive(Parser, Clone)]
#[clap(author, version, long_about = None)]
#[clap(about = "Infers plausible new bilingual dictionary entries from a multilingual translation graph")]
#[clap(propagate_version = true)]
pub struct Args {
    /// Output file; defaults to stdout if unspecified
    #[clap(short, long, value_parser)]
    pub output: Option<String>,

    /// Path to a run.toml overriding the default cutoff/topn/seed/n_iter/languages
    #[clap(long, value_parser, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all logging
    #[clap(short, long, action, global = true)]
    pub quiet: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Clone)]
pub enum Commands {
    /// Rank intermediate languages for a target pair and write the
    /// `<L1>-<L2>-config` recommendation file.
    Recommend {
        lang1: String,
        lang2: String,
        /// Path to stats.csv
        #[clap(long, value_parser)]
        stats: Option<String>,
    },

    /// Build the translation graph for the shortlisted languages of a pair
    /// and report node/edge counts.
    Build {
        lang1: String,
        lang2: String,
        /// Directory of monodix/<lang>.dix lexicon files
        #[clap(long, value_parser)]
        monodix_dir: Option<String>,
        /// Directory of <langA>-<langB> edge-list files
        #[clap(long, value_parser)]
        parsed_dir: Option<String>,
        /// Number of intermediate languages to admit from the recommendation file
        #[clap(short, long, value_parser)]
        languages: Option<usize>,
    },

    /// Run the held-out accuracy evaluation for a language pair.
    Eval {
        lang1: String,
        lang2: String,
        #[clap(long, value_parser)]
        monodix_dir: Option<String>,
        #[clap(long, value_parser)]
        parsed_dir: Option<String>,
        #[clap(short, long, value_parser)]
        languages: Option<usize>,
        /// Max path length considered during candidate search and scoring
        #[clap(long, value_parser)]
        cutoff: Option<u32>,
        /// Fixed top-N selection instead of "auto" mode
        #[clap(long, value_parser)]
        topn: Option<usize>,
        /// PRNG seed for the evaluator's sampling
        #[clap(long, value_parser)]
        seed: Option<u64>,
        /// Number of independent evaluation iterations
        #[clap(long, value_parser)]
        n_iter: Option<u32>,
    },

    /// Search and score translation candidates for every lemma in both
    /// lexicons, writing the `<L1>-<L2>-preview` file.
    Preview {
        lang1: String,
        lang2: String,
        #[clap(long, value_parser)]
        monodix_dir: Option<String>,
        #[clap(long, value_parser)]
        parsed_dir: Option<String>,
        #[clap(short, long, value_parser)]
        languages: Option<usize>,
        #[clap(long, value_parser)]
        cutoff: Option<u32>,
        #[clap(long, value_parser)]
        topn: Option<usize>,
    },
}
