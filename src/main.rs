use clap::Parser;
use osu_recommender::{
    api::OsuApiClient,
    args::Args,
    model::{recommender::Recommender, structures::recommendation::Recommendation},
    utils::progress_utils::progress_bar
};
use std::{process, sync::Arc};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&args.log_level))
        .with_writer(std::io::stderr)
        .init();

    let client = OsuApiClient::new(&args.api_root, &args.api_key);

    // Check the key before spending a whole scan on it
    if !client.test_configuration().await {
        eprintln!(
            "API key was rejected by {}. Keys are issued at https://osu.ppy.sh/p/api",
            args.api_root
        );
        process::exit(1);
    }

    let recommender = Recommender::new(Arc::new(client), args.recommender_config());

    let bar = progress_bar(100, "Scanning for recommendations".to_string());
    let mut progress = recommender.progress();
    let bar_updater = tokio::spawn({
        let bar = bar.clone();
        async move {
            while progress.changed().await.is_ok() {
                let value = *progress.borrow_and_update();
                bar.set_position((value * 100.0).round() as u64);
            }
        }
    });

    let result = recommender.recommend().await;
    bar_updater.abort();
    bar.finish_and_clear();

    let mut recommendations = match result {
        Ok(recommendations) => recommendations,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    // Most-played candidates first, the sort the display defaults to
    recommendations.sort_by(|a, b| b.popularity.cmp(&a.popularity));

    print_recommendations(&recommendations);
}

fn print_recommendations(recommendations: &[Recommendation]) {
    if recommendations.is_empty() {
        println!("No recommendations found. Try raising the scan limits.");
        return;
    }

    println!(
        "{:<9} {:<52} {:>6} {:>8} {:>7} {:>8} {:>11}",
        "ID", "Beatmap", "Stars", "Mods", "PP", "Acc", "Popularity"
    );
    for rec in recommendations {
        let name = format!(
            "{} - {} [{}]",
            rec.beatmap.artist, rec.beatmap.title, rec.beatmap.difficulty_name
        );
        println!(
            "{:<9} {:<52} {:>6.2} {:>8} {:>7.0} {:>7.2}% {:>11}",
            rec.beatmap.id,
            truncated(&name, 52),
            rec.beatmap.stars,
            rec.mods.to_string(),
            rec.expected_performance,
            rec.expected_accuracy * 100.0,
            rec.popularity
        );
    }
}

fn truncated(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }

    let kept: String = name.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}
