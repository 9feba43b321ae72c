//! Vehicle catalog: brands, models and cars.

mod repository;
mod types;

pub use repository::{BrandRepository, CarRepository, VehicleModelRepository};
pub use types::{
    Brand, BrandUpdate, Car, CarUpdate, NewBrand, NewCar, NewVehicleModel, VehicleModel,
    VehicleModelUpdate,
};
