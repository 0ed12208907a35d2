/// Dense vector helpers
pub mod dense;
