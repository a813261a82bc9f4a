use catalog::CatalogSet;
use std::path::Path;
use std::time::Instant;

fn main() {
    let artifact_dir = Path::new("model");

    println!("Loading catalog artifacts...\n");

    let start = Instant::now();
    let catalogs = CatalogSet::load_from_dir(artifact_dir)
        .expect("Failed to load catalogs");
    let elapsed = start.elapsed();

    let (movies, tv) = catalogs.counts();
    let cells = movies * movies + tv * tv;

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("TV shows: {}", tv);
    println!("\nPerformance: {:.0} similarity cells/second",
             cells as f64 / elapsed.as_secs_f64());
}
