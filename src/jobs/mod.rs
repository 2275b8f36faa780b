pub mod stats_scheduler;
