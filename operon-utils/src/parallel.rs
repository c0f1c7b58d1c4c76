//! Parallel processing utilities

use anyhow::Result;

/// Resolve a requested thread count, where 0 means every available core
pub fn resolve_threads(threads: usize) -> usize {
    if threads == 0 {
        num_cpus::get()
    } else {
        threads
    }
}

/// Configure the global thread pool
pub fn configure_thread_pool(threads: usize) -> Result<usize> {
    let threads = resolve_threads(threads);

    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()?;

    Ok(threads)
}

/// Check if we should use parallel processing based on item count
pub fn should_parallelize(item_count: usize, threshold: usize) -> bool {
    item_count > threshold && rayon::current_num_threads() > 1
}
