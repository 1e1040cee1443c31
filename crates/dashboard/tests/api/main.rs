mod dataset_load;
mod helpers;
mod ui_fragments;
