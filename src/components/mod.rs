pub mod status_sankey;
