pub mod analyze_handler;
