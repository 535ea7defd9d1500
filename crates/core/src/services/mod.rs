pub mod correlation_service;
pub mod export_service;
pub mod insight_service;
pub mod journal_service;
pub mod progress_service;
pub mod report_service;
pub mod risk_service;
pub mod timing_service;
pub mod trade_stats_service;
pub mod window_service;
