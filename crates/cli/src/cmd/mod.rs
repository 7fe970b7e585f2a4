pub mod testgrid_config;
