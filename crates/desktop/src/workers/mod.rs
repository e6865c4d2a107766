pub mod analysis_worker;
pub mod model_cache;
#[cfg(test)]
mod test_support;
