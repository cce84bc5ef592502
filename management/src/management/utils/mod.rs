pub mod cycle_report;
