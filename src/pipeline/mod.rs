pub mod stage1_locate;
pub mod stage2_group;
pub mod stage3_metrics;
pub mod stage4_annotate;
pub mod stage5_write;
