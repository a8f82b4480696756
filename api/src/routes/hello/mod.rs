pub mod hello_route;
