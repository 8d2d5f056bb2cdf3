pub mod plot_view;
pub mod spectra_list;
pub mod theme;
pub mod toolbar;
