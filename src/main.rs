use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use staffsheet::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    info!("Starting server at 127.0.0.1:8080");

    // The database connection is opened lazily on the first request.
    HttpServer::new(|| {
        App::new()
            .service(
                web::resource("/employees")
                    .route(web::get().to(handlers::employee::list_employees))
                    .route(web::post().to(handlers::employee::create_employee)),
            )
            .service(
                web::resource("/employees/{id}")
                    .route(web::get().to(handlers::employee::get_employee))
                    .route(web::post().to(handlers::employee::update_employee)),
            )
            .service(
                web::resource("/timesheets")
                    .route(web::get().to(handlers::timesheet::list_timesheets))
                    .route(web::post().to(handlers::timesheet::create_timesheet)),
            )
            .service(
                web::resource("/timesheets/{id}")
                    .route(web::get().to(handlers::timesheet::get_timesheet))
                    .route(web::post().to(handlers::timesheet::update_timesheet)),
            )
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await
}
