mod applications;
mod awards;
mod cancellation;
mod session;
mod support;
