mod property_costs;
mod thresholds;
